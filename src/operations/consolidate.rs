use crate::import::normalize;
use crate::ir::{ConsolidatedGrid, ConsolidatedRow, Grid, GridRow};

use super::group_by;

/// Merge all rows whose labels normalize to the same job key by summing their minutes per date column.
/// Rows come out in the order their job key first appeared in the grid.
pub fn consolidate(grid: &Grid) -> ConsolidatedGrid {
    let num_dates = grid.date_headers().len();
    let rows_by_job = group_by(
        grid.rows().iter(),
        |row| normalize(&row.label),
        |row| row,
    );
    let rows = rows_by_job
        .into_iter()
        .map(|(job_key, rows)| ConsolidatedRow {
            job_key,
            minutes: sum_columns(num_dates, &rows),
        })
        .collect();

    ConsolidatedGrid {
        date_headers: grid.date_headers().to_vec(),
        rows,
    }
}

fn sum_columns(num_dates: usize, rows: &[&GridRow]) -> Vec<u64> {
    rows.iter().fold(vec![0; num_dates], |mut totals, row| {
        for (total, minutes) in totals.iter_mut().zip(&row.minutes) {
            *total = total.saturating_add(*minutes);
        }
        totals
    })
}
