use anyhow::{anyhow, ensure, Context as _, Result};
use csv::StringRecord;
use std::{fs::File, io::Read, path::Path};

mod date;
mod job_key;

pub use date::parse_date_header;
pub use job_key::normalize;

use crate::ir::{Grid, GridRow};

/// Which leading boilerplate rows of a timesheet export get dropped before the header is read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StripPolicy {
    /// Drop every row whose first cell starts with the given prefix
    CommentPrefixed(String),
    /// Drop this many rows at the top of the file, whatever they contain
    FixedCount(usize),
}

impl Default for StripPolicy {
    fn default() -> Self {
        StripPolicy::CommentPrefixed("#".to_string())
    }
}

impl StripPolicy {
    fn apply(&self, records: Vec<StringRecord>) -> Vec<StringRecord> {
        match self {
            StripPolicy::CommentPrefixed(prefix) => records
                .into_iter()
                .filter(|record| {
                    !record
                        .get(0)
                        .is_some_and(|first_cell| first_cell.starts_with(prefix.as_str()))
                })
                .collect(),
            StripPolicy::FixedCount(count) => records.into_iter().skip(*count).collect(),
        }
    }
}

pub fn load_file(path: &Path, strip_policy: &StripPolicy) -> Result<Grid> {
    log::info!("Processing source file: {}", path.display());
    let file = File::open(path)
        .with_context(|| format!("Failed to open source file {}", path.display()))?;
    load(file, strip_policy).with_context(|| format!("Failed to load {}", path.display()))
}

pub fn load(mut input_stream: impl Read, strip_policy: &StripPolicy) -> Result<Grid> {
    let mut content = String::new();
    input_stream.read_to_string(&mut content)?;
    let content = maybe_remove_byte_order_mark(content);

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(b',')
        .quote(b'"')
        .from_reader(content.as_bytes());
    let records = reader
        .records()
        .collect::<Result<Vec<_>, _>>()
        .context("Failed to parse CSV")?;
    let mut records = strip_policy.apply(records).into_iter();

    let header = records
        .next()
        .ok_or_else(|| anyhow!("Source file has no header row"))?;
    let date_headers: Vec<String> = header.iter().skip(1).map(str::to_string).collect();
    let rows = records
        .map(|record| parse_row(&record, &date_headers))
        .collect::<Result<Vec<_>>>()?;

    log::debug!(
        "Loaded {} rows with {} date columns",
        rows.len(),
        date_headers.len()
    );
    Grid::new(date_headers, rows)
}

fn parse_row(record: &StringRecord, date_headers: &[String]) -> Result<GridRow> {
    let line = line_number(record);
    ensure!(
        record.len() == date_headers.len() + 1,
        "Line {line}: expected {} cells (label plus {} dates) but found {}",
        date_headers.len() + 1,
        date_headers.len(),
        record.len(),
    );
    let mut cells = record.iter();
    let label = cells.next().unwrap_or_default().to_string();
    let minutes = cells
        .zip(date_headers)
        .map(|(cell, date)| {
            parse_minutes(cell).with_context(|| {
                format!("Line {line}, column {date:?}: invalid minute count {cell:?}")
            })
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(GridRow { label, minutes })
}

fn parse_minutes(cell: &str) -> Result<u64> {
    Ok(cell.trim().parse::<u64>()?)
}

fn line_number(record: &StringRecord) -> u64 {
    record.position().map_or(0, |position| position.line())
}

fn maybe_remove_byte_order_mark(mut content: String) -> String {
    if content.starts_with('\u{FEFF}') {
        content.remove(0);
    }
    content
}
