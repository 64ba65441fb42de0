use anyhow::{ensure, Result};
use chrono::{DateTime, Utc};
use std::fmt::{self, Display};

/// Canonical job identifier derived from a free-text timesheet label, e.g. `PROJ-123`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct JobKey(String);

impl JobKey {
    pub fn new(key: String) -> Self {
        Self(key)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for JobKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A timesheet as read from the source file. Every row has exactly one minute cell per date column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    date_headers: Vec<String>,
    rows: Vec<GridRow>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridRow {
    pub label: String,
    pub minutes: Vec<u64>,
}

impl Grid {
    pub fn new(date_headers: Vec<String>, rows: Vec<GridRow>) -> Result<Self> {
        for row in &rows {
            ensure!(
                row.minutes.len() == date_headers.len(),
                "Row {:?} has {} minute cells but the header has {} date columns",
                row.label,
                row.minutes.len(),
                date_headers.len(),
            );
        }
        Ok(Self { date_headers, rows })
    }

    pub fn date_headers(&self) -> &[String] {
        &self.date_headers
    }

    pub fn rows(&self) -> &[GridRow] {
        &self.rows
    }
}

/// A timesheet with exactly one row per [JobKey], in the order the keys were first seen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsolidatedGrid {
    pub date_headers: Vec<String>,
    pub rows: Vec<ConsolidatedRow>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsolidatedRow {
    pub job_key: JobKey,
    pub minutes: Vec<u64>,
}

impl TryFrom<ConsolidatedGrid> for Grid {
    type Error = anyhow::Error;

    /// Turn every job key back into a row label. Consolidating the result yields the same grid again.
    fn try_from(consolidated: ConsolidatedGrid) -> Result<Self> {
        let rows = consolidated
            .rows
            .into_iter()
            .map(|row| GridRow {
                label: row.job_key.0,
                minutes: row.minutes,
            })
            .collect();
        Grid::new(consolidated.date_headers, rows)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkLogRecord {
    /// Midnight UTC of the day the work was done
    pub date: DateTime<Utc>,
    pub job_key: JobKey,
    pub minutes: u64,
}

impl WorkLogRecord {
    pub fn time_spent_seconds(&self) -> u64 {
        self.minutes.saturating_mul(60)
    }
}
