use rust_decimal::Decimal;

use crate::ir::ConsolidatedGrid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimesheetSummary {
    /// Minutes worked per date column, summed over all jobs
    pub daily_totals: Vec<u64>,
    pub total_minutes: u64,
    pub num_days: usize,
    pub num_jobs: usize,
}

impl TimesheetSummary {
    pub fn total_hours(&self) -> Decimal {
        minutes_as_hours(self.total_minutes)
    }
}

pub fn summarize(grid: &ConsolidatedGrid) -> TimesheetSummary {
    let daily_totals = (0..grid.date_headers.len())
        .map(|column| {
            grid.rows
                .iter()
                .filter_map(|row| row.minutes.get(column))
                .sum::<u64>()
        })
        .collect::<Vec<_>>();
    TimesheetSummary {
        total_minutes: daily_totals.iter().sum(),
        num_days: daily_totals.len(),
        num_jobs: grid.rows.len(),
        daily_totals,
    }
}

/// Hours rounded to two decimal places
pub fn minutes_as_hours(minutes: u64) -> Decimal {
    (Decimal::from(minutes) / Decimal::from(60)).round_dp(2)
}
