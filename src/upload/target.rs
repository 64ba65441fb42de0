use anyhow::Result;

use crate::ir::{JobKey, WorkLogRecord};
use crate::jira_api::{self, Issue, Jira};

/// Where work logs get uploaded to.
#[allow(async_fn_in_trait)]
pub trait WorklogTarget {
    type Issue;

    async fn find_issue(&self, job_key: &JobKey) -> Result<Self::Issue>;

    async fn add_worklog(&self, issue: &Self::Issue, work_log: &WorkLogRecord) -> Result<()>;
}

impl WorklogTarget for Jira {
    type Issue = Issue;

    async fn find_issue(&self, job_key: &JobKey) -> Result<Issue> {
        jira_api::get_issue(self, job_key).await
    }

    async fn add_worklog(&self, issue: &Issue, work_log: &WorkLogRecord) -> Result<()> {
        jira_api::add_worklog(
            self,
            issue,
            work_log.time_spent_seconds(),
            work_log.date,
        )
        .await
    }
}
