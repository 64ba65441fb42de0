use anyhow::Result;
use std::path::Path;

use crate::import::{self, StripPolicy};
use crate::ir::{ConsolidatedGrid, Grid, WorkLogRecord};
use crate::operations::{self, TimesheetSummary};
use crate::upload::{self, RecordResult, UploadMode, UploadReport, WorklogTarget};

/// A timesheet that was loaded, consolidated and turned into work logs, ready for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedImport {
    pub consolidated: ConsolidatedGrid,
    pub summary: TimesheetSummary,
    pub work_logs: Vec<WorkLogRecord>,
}

pub fn prepare_file(source_file: &Path, strip_policy: &StripPolicy) -> Result<PreparedImport> {
    let grid = import::load_file(source_file, strip_policy)?;
    prepare(&grid)
}

pub fn prepare(grid: &Grid) -> Result<PreparedImport> {
    let consolidated = operations::consolidate(grid);
    let summary = operations::summarize(&consolidated);
    let work_logs = operations::pivot(&consolidated)?;
    Ok(PreparedImport {
        consolidated,
        summary,
        work_logs,
    })
}

#[derive(Debug)]
pub enum ImportOutcome {
    /// The live run wasn't confirmed, nothing was uploaded
    Declined,
    Completed(UploadReport),
}

/// Upload the work logs. A live run first asks `confirm` with the number of work logs
/// and only goes ahead if it answers yes. Dry runs don't ask.
pub async fn run_import<T: WorklogTarget>(
    target: &T,
    work_logs: Vec<WorkLogRecord>,
    mode: UploadMode,
    concurrency: usize,
    confirm: impl FnOnce(usize) -> Result<bool>,
    on_result: impl FnMut(&RecordResult),
) -> Result<ImportOutcome> {
    if mode == UploadMode::Live && !confirm(work_logs.len())? {
        return Ok(ImportOutcome::Declined);
    }
    let report = upload::upload(target, work_logs, mode, concurrency, on_result).await;
    Ok(ImportOutcome::Completed(report))
}
