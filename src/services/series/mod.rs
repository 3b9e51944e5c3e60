pub mod builder;
pub mod interpolate;
pub mod parsers;
pub mod profiler;
pub mod selector;

pub use builder::build_series;
pub use interpolate::fill_gaps;
pub use profiler::profile_columns;
pub use selector::{resolve_selection, select_columns, validate_override};

use thiserror::Error;

/// Pipeline failures. None of these are retryable with the same input; the
/// caller has to upload different data or pick different columns.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SeriesError {
    #[error("dataset has no data rows to profile (got {rows})")]
    EmptyDataset { rows: usize },

    #[error("no column crossed the date-candidate threshold {threshold} ({column_count} columns profiled)")]
    NoDateColumn { threshold: f64, column_count: usize },

    #[error("no numeric column distinct from date column {date_column} crossed the threshold {threshold} ({column_count} columns profiled)")]
    NoMetricColumn {
        threshold: f64,
        column_count: usize,
        date_column: usize,
    },

    #[error("invalid column override: {reason}")]
    InvalidOverride { reason: String },

    #[error("every row was dropped while parsing dates ({rows_dropped} rows)")]
    EmptyResult { rows_dropped: usize },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RawTable;

    fn table(headers: &[&str], rows: &[&[&str]]) -> RawTable {
        RawTable::new(
            headers.iter().map(|s| s.to_string()).collect(),
            rows.iter()
                .map(|r| r.iter().map(|s| s.to_string()).collect())
                .collect(),
        )
    }

    #[test]
    fn pipeline_end_to_end() {
        let t = table(
            &["Day", "Price"],
            &[
                &["2024-01-01", "100"],
                &["2024-01-02", ""],
                &["2024-01-03", "120"],
            ],
        );
        let profiles = profile_columns(&t).unwrap();
        let selection = select_columns(&profiles).unwrap();
        assert_eq!(selection.date_column, 0);
        assert_eq!(selection.metric_column, 1);

        let series = build_series(&t, &selection).unwrap();
        assert_eq!(series.len(), 3);
        assert_eq!(series[1].date, "2024-01-02");
        assert_eq!(series[1].value, 110.0);
    }

    #[test]
    fn all_empty_metric_column_fails_selection() {
        let t = table(
            &["Day", "Price"],
            &[&["2024-01-01", ""], &["2024-01-02", ""]],
        );
        let profiles = profile_columns(&t).unwrap();
        assert!(matches!(
            select_columns(&profiles),
            Err(SeriesError::NoMetricColumn { .. })
        ));
    }

    #[test]
    fn rebuilding_with_a_new_selection_is_reproducible() {
        let t = table(
            &["Label", "When", "Amount"],
            &[
                &["a", "2024-01-01", "1"],
                &["b", "2024-01-02", "2"],
                &["c", "2024-01-03", "3"],
            ],
        );
        let profiles = profile_columns(&t).unwrap();
        let auto = select_columns(&profiles).unwrap();
        let overridden = resolve_selection(&profiles, Some(1), Some(2)).unwrap();
        assert_eq!(auto, overridden);
        assert_eq!(
            build_series(&t, &auto).unwrap(),
            build_series(&t, &overridden).unwrap()
        );
    }
}
