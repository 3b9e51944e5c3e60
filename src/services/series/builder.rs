use chrono::NaiveDateTime;

use super::interpolate::fill_gaps;
use super::parsers::{parse_date, parse_numeric};
use super::SeriesError;
use crate::models::{ColumnSelection, RawTable, TimePoint};

/// Project the table through the selected columns and produce the cleaned
/// series: rows whose date cell does not parse are dropped, rows with an
/// unparsable metric are kept as gaps and filled by interpolation, and the
/// result is ordered by timestamp.
///
/// Rows sharing a timestamp keep their original relative order (the sort is
/// stable), and rows on the same calendar day stay separate entries under
/// the same `YYYY-MM-DD` label.
pub fn build_series(
    table: &RawTable,
    selection: &ColumnSelection,
) -> Result<Vec<TimePoint>, SeriesError> {
    let mut parsed: Vec<(NaiveDateTime, Option<f64>)> = Vec::with_capacity(table.row_count());
    for row in 0..table.row_count() {
        let Some(timestamp) = parse_date(table.cell(row, selection.date_column)) else {
            continue;
        };
        let value = parse_numeric(table.cell(row, selection.metric_column));
        parsed.push((timestamp, value));
    }

    if parsed.is_empty() {
        return Err(SeriesError::EmptyResult {
            rows_dropped: table.row_count(),
        });
    }

    parsed.sort_by_key(|(timestamp, _)| *timestamp);

    let values: Vec<Option<f64>> = parsed.iter().map(|(_, v)| *v).collect();
    let filled = fill_gaps(&values);

    Ok(parsed
        .iter()
        .zip(filled)
        .map(|((timestamp, _), value)| TimePoint {
            date: timestamp.format("%Y-%m-%d").to_string(),
            value,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(rows: &[[&str; 2]]) -> RawTable {
        RawTable::new(
            vec!["Day".to_string(), "Price".to_string()],
            rows.iter()
                .map(|r| r.iter().map(|s| s.to_string()).collect())
                .collect(),
        )
    }

    const SELECTION: ColumnSelection = ColumnSelection {
        date_column: 0,
        metric_column: 1,
    };

    #[test]
    fn midpoint_gap_is_interpolated() {
        let t = table(&[
            ["2024-01-01", "100"],
            ["2024-01-02", ""],
            ["2024-01-03", "120"],
        ]);
        let series = build_series(&t, &SELECTION).unwrap();
        assert_eq!(
            series,
            vec![
                TimePoint { date: "2024-01-01".into(), value: 100.0 },
                TimePoint { date: "2024-01-02".into(), value: 110.0 },
                TimePoint { date: "2024-01-03".into(), value: 120.0 },
            ]
        );
    }

    #[test]
    fn rows_with_bad_dates_are_dropped() {
        let t = table(&[
            ["2024-01-02", "5"],
            ["not a date", "6"],
            ["2024-01-01", "7"],
        ]);
        let series = build_series(&t, &SELECTION).unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].date, "2024-01-01");
        assert_eq!(series[1].date, "2024-01-02");
    }

    #[test]
    fn output_is_sorted_and_never_decreasing() {
        let t = table(&[
            ["2024-03-05", "3"],
            ["2024-01-05", "1"],
            ["2024-02-05", "2"],
        ]);
        let series = build_series(&t, &SELECTION).unwrap();
        for pair in series.windows(2) {
            assert!(pair[0].date <= pair[1].date);
        }
    }

    #[test]
    fn same_day_rows_stay_separate_in_original_order() {
        let t = table(&[
            ["2024-01-01T09:00:00", "1"],
            ["2024-01-01T09:00:00", "2"],
            ["2024-01-01T15:00:00", "3"],
        ]);
        let series = build_series(&t, &SELECTION).unwrap();
        assert_eq!(series.len(), 3);
        assert!(series.iter().all(|p| p.date == "2024-01-01"));
        // Stable sort keeps the 9am rows in file order.
        assert_eq!(series[0].value, 1.0);
        assert_eq!(series[1].value, 2.0);
    }

    #[test]
    fn leading_gap_backward_fills() {
        let t = table(&[["2024-01-01", ""], ["2024-01-02", "50"]]);
        let series = build_series(&t, &SELECTION).unwrap();
        assert_eq!(series[0].value, 50.0);
    }

    #[test]
    fn trailing_gap_forward_fills() {
        let t = table(&[["2024-01-01", "50"], ["2024-01-02", ""]]);
        let series = build_series(&t, &SELECTION).unwrap();
        assert_eq!(series[1].value, 50.0);
    }

    #[test]
    fn currency_cells_parse_and_dashes_become_gaps() {
        let t = table(&[
            ["2024-01-01", "$1,234.50"],
            ["2024-01-02", "  -- "],
            ["2024-01-03", "$1,236.50"],
        ]);
        let series = build_series(&t, &SELECTION).unwrap();
        assert_eq!(series[0].value, 1234.5);
        assert_eq!(series[1].value, 1235.5);
    }

    #[test]
    fn all_dates_unparsable_is_empty_result() {
        let t = table(&[["nope", "1"], ["still nope", "2"]]);
        assert_eq!(
            build_series(&t, &SELECTION).unwrap_err(),
            SeriesError::EmptyResult { rows_dropped: 2 }
        );
    }
}
