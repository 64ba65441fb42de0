use futures::{stream, StreamExt as _};

use crate::ir::WorkLogRecord;

mod report;
mod target;

pub use report::{RecordOutcome, RecordResult, UploadReport};
pub use target::WorklogTarget;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadMode {
    /// Look up issues but don't write any work logs
    DryRun,
    Live,
}

/// Upload all work logs to the target. Failing to find an issue or to add a work log only affects
/// that one work log, it is recorded in the report and the upload carries on.
///
/// At most `concurrency` work logs are in flight at once. `on_result` is called for each work log
/// as it finishes, in the same order as `work_logs`.
pub async fn upload<T: WorklogTarget>(
    target: &T,
    work_logs: Vec<WorkLogRecord>,
    mode: UploadMode,
    concurrency: usize,
    mut on_result: impl FnMut(&RecordResult),
) -> UploadReport {
    log::info!("Importing {} work logs to JIRA...", work_logs.len());

    let mut report = UploadReport::new(mode);
    let mut results = stream::iter(work_logs)
        .map(|work_log| upload_one(target, work_log, mode))
        .buffered(concurrency.max(1));
    while let Some(result) = results.next().await {
        on_result(&result);
        report.results.push(result);
    }

    log::info!("Importing work logs to JIRA...done");
    report
}

async fn upload_one<T: WorklogTarget>(
    target: &T,
    work_log: WorkLogRecord,
    mode: UploadMode,
) -> RecordResult {
    let issue = match target.find_issue(&work_log.job_key).await {
        Ok(issue) => issue,
        Err(err) => {
            log::warn!(
                "Could not find issue with key {}. Skipping... ({err:#})",
                work_log.job_key
            );
            return RecordResult {
                work_log,
                outcome: RecordOutcome::IssueNotFound(format!("{err:#}")),
            };
        }
    };

    let outcome = match mode {
        UploadMode::DryRun => RecordOutcome::WouldSubmit,
        UploadMode::Live => match target.add_worklog(&issue, &work_log).await {
            Ok(()) => RecordOutcome::Submitted,
            Err(err) => {
                log::warn!(
                    "Could not add work log to issue {}. Reason: {err:#}",
                    work_log.job_key
                );
                RecordOutcome::SubmissionFailed(format!("{err:#}"))
            }
        },
    };
    RecordResult { work_log, outcome }
}

#[cfg(test)]
pub(crate) mod testutils {
    use anyhow::{anyhow, bail, Result};
    use std::collections::HashSet;
    use std::sync::Mutex;

    use crate::ir::{JobKey, WorkLogRecord};

    use super::WorklogTarget;

    /// In-memory tracker that knows a fixed set of issues and remembers what was written to it
    pub struct FakeTracker {
        issues: HashSet<String>,
        rejecting: HashSet<String>,
        lookups: Mutex<Vec<JobKey>>,
        added: Mutex<Vec<(String, u64, String)>>,
    }

    impl FakeTracker {
        pub fn new(issues: &[&str]) -> Self {
            Self {
                issues: issues.iter().map(|issue| issue.to_string()).collect(),
                rejecting: HashSet::new(),
                lookups: Mutex::new(Vec::new()),
                added: Mutex::new(Vec::new()),
            }
        }

        /// Issues that exist but refuse new work logs
        pub fn rejecting(mut self, issues: &[&str]) -> Self {
            self.rejecting = issues.iter().map(|issue| issue.to_string()).collect();
            self
        }

        pub fn added(&self) -> Vec<(String, u64, String)> {
            self.added.lock().unwrap().clone()
        }

        pub fn lookups(&self) -> Vec<JobKey> {
            self.lookups.lock().unwrap().clone()
        }
    }

    impl WorklogTarget for FakeTracker {
        type Issue = String;

        async fn find_issue(&self, job_key: &JobKey) -> Result<String> {
            self.lookups.lock().unwrap().push(job_key.clone());
            if self.issues.contains(job_key.as_str()) {
                Ok(job_key.to_string())
            } else {
                Err(anyhow!("Issue does not exist or you do not have permission to see it."))
            }
        }

        async fn add_worklog(&self, issue: &String, work_log: &WorkLogRecord) -> Result<()> {
            if self.rejecting.contains(issue) {
                bail!("Issue {issue} is closed");
            }
            self.added.lock().unwrap().push((
                issue.clone(),
                work_log.time_spent_seconds(),
                crate::jira_api::format_started(&work_log.date),
            ));
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone as _, Utc};

    use crate::ir::JobKey;

    use super::testutils::FakeTracker;
    use super::*;

    fn work_log(day: u32, job_key: &str, minutes: u64) -> WorkLogRecord {
        WorkLogRecord {
            date: Utc.with_ymd_and_hms(2024, 1, day, 0, 0, 0).unwrap(),
            job_key: JobKey::new(job_key.to_string()),
            minutes,
        }
    }

    fn job(key: &str) -> JobKey {
        JobKey::new(key.to_string())
    }

    fn some_work_logs() -> Vec<WorkLogRecord> {
        vec![
            work_log(1, "ABC-1", 45),
            work_log(1, "MISSING-7", 30),
            work_log(2, "ABC-1", 45),
            work_log(2, "CLOSED-2", 15),
            work_log(3, "MISSING-7", 60),
            work_log(3, "ADMIN", 20),
        ]
    }

    #[tokio::test]
    async fn live_upload() {
        let tracker = FakeTracker::new(&["ABC-1", "CLOSED-2"]).rejecting(&["CLOSED-2"]);
        let mut seen = Vec::new();

        let report = upload(&tracker, some_work_logs(), UploadMode::Live, 1, |result| {
            seen.push(result.clone())
        })
        .await;

        assert_eq!(
            vec![
                (
                    "ABC-1".to_string(),
                    2700,
                    "2024-01-01T00:00:00.000+0000".to_string()
                ),
                (
                    "ABC-1".to_string(),
                    2700,
                    "2024-01-02T00:00:00.000+0000".to_string()
                ),
            ],
            tracker.added(),
        );
        assert_eq!(report.results, seen);
        assert_eq!(UploadMode::Live, report.mode);
        assert_eq!(6, report.records_processed());
        assert_eq!(215, report.minutes_processed());
        assert_eq!(90, report.minutes_submitted());

        let outcomes: Vec<_> = report.results.iter().map(|r| r.outcome.clone()).collect();
        assert!(matches!(outcomes[0], RecordOutcome::Submitted));
        assert!(matches!(outcomes[1], RecordOutcome::IssueNotFound(_)));
        assert!(matches!(outcomes[2], RecordOutcome::Submitted));
        assert!(matches!(outcomes[3], RecordOutcome::SubmissionFailed(_)));
        assert!(matches!(outcomes[4], RecordOutcome::IssueNotFound(_)));
        assert!(matches!(outcomes[5], RecordOutcome::IssueNotFound(_)));
    }

    #[tokio::test]
    async fn dry_run_looks_up_but_never_writes() {
        let tracker = FakeTracker::new(&["ABC-1", "CLOSED-2"]).rejecting(&["CLOSED-2"]);

        let report = upload(&tracker, some_work_logs(), UploadMode::DryRun, 1, |_| {}).await;

        assert!(tracker.added().is_empty());
        assert_eq!(
            vec![
                job("ABC-1"),
                job("MISSING-7"),
                job("ABC-1"),
                job("CLOSED-2"),
                job("MISSING-7"),
                job("ADMIN"),
            ],
            tracker.lookups(),
        );
        assert_eq!(6, report.records_processed());
        assert_eq!(105, report.minutes_submitted());
        assert_eq!(0, report.failed_submissions().count());
        assert!(report
            .results
            .iter()
            .all(|result| result.outcome != RecordOutcome::Submitted));
    }

    #[tokio::test]
    async fn manual_entries_grouped_by_job() {
        let tracker = FakeTracker::new(&["ABC-1"]);

        let report = upload(&tracker, some_work_logs(), UploadMode::Live, 1, |_| {}).await;

        let manual_entries = report.manual_entries();
        assert_eq!(
            vec![job("MISSING-7"), job("CLOSED-2"), job("ADMIN")],
            manual_entries
                .iter()
                .map(|(job_key, _)| job_key.clone())
                .collect::<Vec<_>>(),
        );
        assert_eq!(
            vec![&work_log(1, "MISSING-7", 30), &work_log(3, "MISSING-7", 60)],
            manual_entries[0].1,
        );
        assert_eq!(vec![&work_log(3, "ADMIN", 20)], manual_entries[2].1);
    }

    #[tokio::test]
    async fn failed_submissions_are_reported() {
        let tracker = FakeTracker::new(&["ABC-1", "CLOSED-2"]).rejecting(&["CLOSED-2"]);

        let report = upload(&tracker, some_work_logs(), UploadMode::Live, 1, |_| {}).await;

        let failed: Vec<_> = report.failed_submissions().collect();
        assert_eq!(1, failed.len());
        assert_eq!(&work_log(2, "CLOSED-2", 15), failed[0].0);
        assert_eq!("Issue CLOSED-2 is closed", failed[0].1);
    }

    #[tokio::test]
    async fn concurrent_upload_keeps_order() {
        let tracker = FakeTracker::new(&["ABC-1", "CLOSED-2", "ADMIN"]);
        let work_logs = some_work_logs();

        let sequential = upload(&tracker, work_logs.clone(), UploadMode::DryRun, 1, |_| {}).await;
        let concurrent = upload(&tracker, work_logs.clone(), UploadMode::DryRun, 4, |_| {}).await;

        assert_eq!(sequential, concurrent);
        assert_eq!(
            work_logs,
            concurrent
                .results
                .into_iter()
                .map(|result| result.work_log)
                .collect::<Vec<_>>(),
        );
    }

    #[tokio::test]
    async fn zero_concurrency_is_treated_as_one() {
        let tracker = FakeTracker::new(&["ABC-1"]);

        let report = upload(&tracker, some_work_logs(), UploadMode::DryRun, 0, |_| {}).await;

        assert_eq!(6, report.records_processed());
    }

    #[tokio::test]
    async fn missing_jira_issue_becomes_manual_entry() {
        let (jira, server) = crate::jira_api::testutils::serve_once(
            "404 Not Found",
            r#"{"errorMessages":["Issue does not exist or you do not have permission to see it."],"errors":{}}"#,
        )
        .await;

        let report = upload(
            &jira,
            vec![work_log(1, "MISSING-7", 30)],
            UploadMode::Live,
            1,
            |_| {},
        )
        .await;

        server.await.unwrap();
        assert!(matches!(
            &report.results[0].outcome,
            RecordOutcome::IssueNotFound(reason) if reason.contains("404 Not Found")
        ));
        assert_eq!(
            vec![job("MISSING-7")],
            report
                .manual_entries()
                .into_iter()
                .map(|(job_key, _)| job_key)
                .collect::<Vec<_>>(),
        );
        assert_eq!(0, report.minutes_submitted());
    }

    #[tokio::test]
    async fn nothing_to_upload() {
        let tracker = FakeTracker::new(&[]);

        let report = upload(&tracker, vec![], UploadMode::Live, 1, |_| {}).await;

        assert_eq!(0, report.records_processed());
        assert_eq!(0, report.minutes_processed());
        assert!(report.manual_entries().is_empty());
        assert!(tracker.lookups().is_empty());
    }
}
