use anyhow::{anyhow, ensure, Context as _, Result};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::jira_api::JiraAuth;

#[derive(Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub jira: JiraConfig,
}

/// JIRA connection settings. Every field may come from the config file or the command line.
#[derive(Debug, Default, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JiraConfig {
    pub url: Option<String>,
    pub login: Option<String>,
    pub api_token: Option<String>,
}

impl JiraConfig {
    /// Fields set in `overrides` win over fields set in `self`
    pub fn merge(self, overrides: JiraConfig) -> JiraConfig {
        JiraConfig {
            url: overrides.url.or(self.url),
            login: overrides.login.or(self.login),
            api_token: overrides.api_token.or(self.api_token),
        }
    }

    pub fn into_auth(self) -> Result<JiraAuth> {
        let (Some(url), Some(login), Some(api_token)) = (self.url, self.login, self.api_token)
        else {
            return Err(anyhow!(
                "JIRA url, username and API token must be specified, either in the config file or on the command line"
            ));
        };
        let url = Url::parse(&url).with_context(|| format!("Invalid JIRA url {url:?}"))?;
        ensure!(
            matches!(url.scheme(), "http" | "https"),
            "JIRA url {url} must be http or https"
        );
        Ok(JiraAuth::new(url, login, api_token))
    }
}

pub fn load(path: &Path) -> Result<Config> {
    log::info!("Loading config file {}", path.display());
    ensure!(
        path.exists(),
        "Config file {} does not exist",
        path.display()
    );
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    let config: Config = serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file {}", path.display()))?;
    Ok(config)
}

/// Combine the optional config file with command line overrides into the credentials used for JIRA.
pub fn resolve_jira_auth(config_file: Option<&Path>, overrides: JiraConfig) -> Result<JiraAuth> {
    let from_file = match config_file {
        Some(path) => load(path)?.jira,
        None => JiraConfig::default(),
    };
    from_file.merge(overrides).into_auth()
}
