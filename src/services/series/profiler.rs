use rayon::prelude::*;
use smallvec::SmallVec;

use super::parsers::{parse_date, parse_numeric};
use super::SeriesError;
use crate::models::{ColumnProfile, RawTable, SAMPLE_SIZE};

/// Score every column of the table by how often its cells parse as a date
/// and as a number. Pure function of the table; output order matches column
/// order.
pub fn profile_columns(table: &RawTable) -> Result<Vec<ColumnProfile>, SeriesError> {
    let rows = table.row_count();
    if rows == 0 {
        return Err(SeriesError::EmptyDataset { rows });
    }

    let profiles = (0..table.column_count())
        .into_par_iter()
        .map(|col| profile_column(table, col, rows))
        .collect();

    Ok(profiles)
}

fn profile_column(table: &RawTable, col: usize, rows: usize) -> ColumnProfile {
    let mut date_hits = 0usize;
    let mut numeric_hits = 0usize;
    let mut empty_count = 0usize;
    let mut sample_values = SmallVec::<[String; SAMPLE_SIZE]>::new();

    for row in 0..rows {
        let cell = table.cell(row, col);
        if cell.trim().is_empty() {
            empty_count += 1;
        }
        if parse_date(cell).is_some() {
            date_hits += 1;
        }
        if parse_numeric(cell).is_some() {
            numeric_hits += 1;
        }
        if sample_values.len() < SAMPLE_SIZE {
            sample_values.push(cell.to_string());
        }
    }

    ColumnProfile {
        index: col,
        header: table.headers.get(col).cloned().unwrap_or_default(),
        date_score: date_hits as f64 / rows as f64,
        numeric_score: numeric_hits as f64 / rows as f64,
        empty_count,
        sample_values,
    }
}
