use anyhow::Result;
use serde::Deserialize;

use crate::ir::JobKey;

use super::{client::check_status, Jira};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Issue {
    pub id: String,
    pub key: String,
}

pub async fn get_issue(client: &Jira, key: &JobKey) -> Result<Issue> {
    log::debug!("Requesting issue {key}...");

    let url = client.endpoint(&["issue", key.as_str()])?;
    let response = client
        .client()
        .get(url)
        .query(&[("fields", "summary")])
        .send()
        .await?;
    let issue = check_status(response).await?.json::<Issue>().await?;

    log::debug!("Requesting issue {key}...done");
    Ok(issue)
}
