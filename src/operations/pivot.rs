use anyhow::{anyhow, Result};

use crate::import::parse_date_header;
use crate::ir::{ConsolidatedGrid, WorkLogRecord};

/// Flatten the day-by-job grid into one work log per non-zero cell.
/// Work logs are ordered by date column first, then by job row.
pub fn pivot(grid: &ConsolidatedGrid) -> Result<Vec<WorkLogRecord>> {
    let mut work_logs = Vec::new();
    for (column, date_header) in grid.date_headers.iter().enumerate() {
        let date = parse_date_header(date_header)?;
        for row in &grid.rows {
            let minutes = *row.minutes.get(column).ok_or_else(|| {
                anyhow!(
                    "Job {} has no minute cell for column {date_header:?}",
                    row.job_key
                )
            })?;
            if minutes > 0 {
                work_logs.push(WorkLogRecord {
                    date,
                    job_key: row.job_key.clone(),
                    minutes,
                });
            }
        }
    }
    Ok(work_logs)
}
