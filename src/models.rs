use serde::Serialize;
use smallvec::SmallVec;

pub const SAMPLE_SIZE: usize = 3;

/// Parse-success rate a column must exceed to become a selection candidate.
pub const CANDIDATE_THRESHOLD: f64 = 0.4;

/// An uploaded sheet decoded to strings: row 0 of the file becomes `headers`,
/// the rest `rows`. Built once per upload and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Cell at (row, col). Short rows read as empty strings so every row
    /// lines up with the header count.
    pub fn cell(&self, row: usize, col: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map(String::as_str)
            .unwrap_or("")
    }
}

/// Per-column parse statistics computed by the profiler.
#[derive(Debug, Clone)]
pub struct ColumnProfile {
    pub index: usize,
    pub header: String,
    pub date_score: f64,
    pub numeric_score: f64,
    pub empty_count: usize,
    pub sample_values: SmallVec<[String; SAMPLE_SIZE]>,
}

impl ColumnProfile {
    pub fn is_date_candidate(&self) -> bool {
        self.date_score > CANDIDATE_THRESHOLD
    }

    pub fn is_numeric_candidate(&self) -> bool {
        self.numeric_score > CANDIDATE_THRESHOLD
    }
}

/// The pair of columns the series is projected through. Produced by the
/// selector or by a validated caller override; the two indices are always
/// distinct.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSelection {
    pub date_column: usize,
    pub metric_column: usize,
}

/// One entry of the cleaned series. `date` is a calendar-day label
/// (`YYYY-MM-DD`, time-of-day discarded); `value` is never null, gaps are
/// filled before this type is constructed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimePoint {
    pub date: String,
    pub value: f64,
}
