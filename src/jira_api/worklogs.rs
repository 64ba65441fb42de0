use anyhow::Result;
use chrono::{DateTime, Utc};
use serde_json::json;

use super::{client::check_status, Issue, Jira};

pub async fn add_worklog(
    client: &Jira,
    issue: &Issue,
    time_spent_seconds: u64,
    started: DateTime<Utc>,
) -> Result<()> {
    log::debug!("Adding work log to issue {}...", issue.key);

    let url = client.endpoint(&["issue", issue.key.as_str(), "worklog"])?;
    let response = client
        .client()
        .post(url)
        .json(&worklog_body(time_spent_seconds, started))
        .send()
        .await?;
    check_status(response).await?;

    log::debug!("Adding work log to issue {}...done", issue.key);
    Ok(())
}

fn worklog_body(time_spent_seconds: u64, started: DateTime<Utc>) -> serde_json::Value {
    json!({
        "timeSpentSeconds": time_spent_seconds,
        "started": format_started(&started),
    })
}

/// The timestamp format JIRA expects for the start of a work log, e.g. `2024-12-25T00:00:00.000+0000`
pub fn format_started(started: &DateTime<Utc>) -> String {
    started.format("%Y-%m-%dT%H:%M:%S%.3f%z").to_string()
}
