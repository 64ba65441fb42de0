use anyhow::{anyhow, bail, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION},
    Client, Response, Url,
};
use std::time::Duration;

use super::JiraAuth;

const API_PATH: &[&str] = &["rest", "api", "2"];
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub struct Jira {
    client: Client,
    base_url: Url,
}

impl Jira {
    pub fn new(auth: &JiraAuth) -> Result<Jira> {
        let credentials = STANDARD.encode(format!("{}:{}", auth.login(), auth.api_token()));
        let mut authorization = HeaderValue::from_str(&format!("Basic {credentials}"))?;
        authorization.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, authorization);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Jira {
            client,
            base_url: auth.url().clone(),
        })
    }

    pub(super) fn client(&self) -> &Client {
        &self.client
    }

    /// URL of a REST API v2 endpoint. Each path element becomes one percent-encoded segment.
    pub(super) fn endpoint(&self, path: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| anyhow!("JIRA url {} can't be used as a base url", self.base_url))?
            .pop_if_empty()
            .extend(API_PATH)
            .extend(path);
        Ok(url)
    }
}

/// Turn non-success responses into errors that carry the response body
pub(super) async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let url = response.url().clone();
    let body = response.text().await.unwrap_or_default();
    bail!("JIRA responded with {status} for {url}: {body}");
}
