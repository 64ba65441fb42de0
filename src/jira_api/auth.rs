use reqwest::Url;
use std::fmt::{self, Debug};

#[derive(Clone)]
pub struct JiraAuth {
    url: Url,
    login: String,
    api_token: String,
}

impl JiraAuth {
    pub fn new(url: Url, login: String, api_token: String) -> Self {
        Self {
            url,
            login,
            api_token,
        }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn login(&self) -> &str {
        &self.login
    }

    pub(super) fn api_token(&self) -> &str {
        &self.api_token
    }
}

impl Debug for JiraAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JiraAuth")
            .field("url", &self.url.as_str())
            .field("login", &self.login)
            .field("api_token", &"[redacted]")
            .finish()
    }
}
