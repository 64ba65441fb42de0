use clap::{builder::NonEmptyStringValueParser, Parser};
use std::path::PathBuf;

use crate::config::JiraConfig;
use crate::import::StripPolicy;

/// Import a Daily timesheet export and log the time as JIRA work logs.
///
/// Without --live, issues are looked up but no work logs are written.
#[derive(Parser, Debug)]
pub struct Args {
    /// Path to the timesheet CSV file
    #[clap(short, long)]
    pub source_file: PathBuf,

    /// YAML file containing the JIRA url, login and api token
    #[clap(short, long)]
    pub config_file: Option<PathBuf>,

    /// JIRA url, overrides the config file
    #[clap(short, long)]
    pub jira_url: Option<String>,

    /// JIRA username, overrides the config file
    #[clap(short, long)]
    pub username: Option<String>,

    /// JIRA api token, overrides the config file
    #[clap(short, long)]
    pub token: Option<String>,

    /// Actually add the work logs to JIRA
    #[clap(long)]
    pub live: bool,

    /// Drop this many rows at the top of the file instead of dropping comment rows
    #[clap(long, conflicts_with = "comment_prefix")]
    pub skip_rows: Option<usize>,

    /// Rows whose first cell starts with this prefix are ignored
    #[clap(long, default_value = "#", value_parser = NonEmptyStringValueParser::new())]
    pub comment_prefix: String,

    /// Maximum number of JIRA requests in flight at the same time
    #[clap(long, default_value_t = 1, value_parser = clap::value_parser!(u16).range(1..))]
    pub concurrency: u16,
}

impl Args {
    pub fn strip_policy(&self) -> StripPolicy {
        match self.skip_rows {
            Some(count) => StripPolicy::FixedCount(count),
            None => StripPolicy::CommentPrefixed(self.comment_prefix.clone()),
        }
    }

    pub fn jira_overrides(&self) -> JiraConfig {
        JiraConfig {
            url: self.jira_url.clone(),
            login: self.username.clone(),
            api_token: self.token.clone(),
        }
    }
}

pub fn parse() -> Args {
    Args::parse()
}
