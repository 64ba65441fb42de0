use anyhow::{bail, Context as _, Result};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

/// Parse a date column header, either `DD/MM/YYYY` or `YYYY-MM-DD`, into midnight UTC of that day.
pub fn parse_date_header(header: &str) -> Result<DateTime<Utc>> {
    let header = header.trim();
    let format = if header.contains('/') {
        "%d/%m/%Y"
    } else if header.contains('-') {
        "%Y-%m-%d"
    } else {
        bail!("Invalid date format in column header: {header:?}");
    };
    let date = NaiveDate::parse_from_str(header, format)
        .with_context(|| format!("Invalid date in column header: {header:?}"))?;
    Ok(date.and_time(NaiveTime::MIN).and_utc())
}
