use rust_decimal::Decimal;

use crate::ir::{JobKey, WorkLogRecord};
use crate::operations::{group_by, minutes_as_hours};

use super::UploadMode;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordOutcome {
    Submitted,
    /// Dry run, the issue exists but nothing was written
    WouldSubmit,
    IssueNotFound(String),
    SubmissionFailed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordResult {
    pub work_log: WorkLogRecord,
    pub outcome: RecordOutcome,
}

/// Outcome of an upload, one result per work log in the order the work logs were given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadReport {
    pub mode: UploadMode,
    pub results: Vec<RecordResult>,
}

impl UploadReport {
    pub fn new(mode: UploadMode) -> Self {
        Self {
            mode,
            results: Vec::new(),
        }
    }

    pub fn records_processed(&self) -> usize {
        self.results.len()
    }

    pub fn minutes_processed(&self) -> u64 {
        self.results
            .iter()
            .map(|result| result.work_log.minutes)
            .sum()
    }

    /// Minutes that were written to the tracker, or would have been in a dry run
    pub fn minutes_submitted(&self) -> u64 {
        self.results
            .iter()
            .filter(|result| {
                matches!(
                    result.outcome,
                    RecordOutcome::Submitted | RecordOutcome::WouldSubmit
                )
            })
            .map(|result| result.work_log.minutes)
            .sum()
    }

    pub fn hours_processed(&self) -> Decimal {
        minutes_as_hours(self.minutes_processed())
    }

    pub fn hours_submitted(&self) -> Decimal {
        minutes_as_hours(self.minutes_submitted())
    }

    /// Work logs whose job key didn't resolve to an issue, grouped by job key in first-seen order.
    /// These need to be entered by hand.
    pub fn manual_entries(&self) -> Vec<(JobKey, Vec<&WorkLogRecord>)> {
        group_by(
            self.results
                .iter()
                .filter(|result| matches!(result.outcome, RecordOutcome::IssueNotFound(_))),
            |result| result.work_log.job_key.clone(),
            |result| &result.work_log,
        )
    }

    pub fn failed_submissions(&self) -> impl Iterator<Item = (&WorkLogRecord, &str)> {
        self.results.iter().filter_map(|result| match &result.outcome {
            RecordOutcome::SubmissionFailed(reason) => Some((&result.work_log, reason.as_str())),
            _ => None,
        })
    }
}
