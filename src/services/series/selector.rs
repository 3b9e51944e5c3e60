use super::SeriesError;
use crate::models::{ColumnProfile, ColumnSelection, CANDIDATE_THRESHOLD};

/// Pick the date and metric columns automatically. Deterministic: highest
/// score wins, ties go to the lowest column index, and the metric column is
/// never the date column.
pub fn select_columns(profiles: &[ColumnProfile]) -> Result<ColumnSelection, SeriesError> {
    resolve_selection(profiles, None, None)
}

/// Selection with optional caller overrides. A missing index falls back to
/// the automatic pick; supplied indices go through the same validation the
/// automatic path guarantees.
pub fn resolve_selection(
    profiles: &[ColumnProfile],
    date_override: Option<usize>,
    metric_override: Option<usize>,
) -> Result<ColumnSelection, SeriesError> {
    let date_column = match date_override {
        Some(idx) => idx,
        None => best_by(profiles, |p| p.is_date_candidate().then_some(p.date_score)).ok_or(
            SeriesError::NoDateColumn {
                threshold: CANDIDATE_THRESHOLD,
                column_count: profiles.len(),
            },
        )?,
    };

    let metric_column = match metric_override {
        Some(idx) => idx,
        None => best_by(profiles, |p| {
            (p.index != date_column && p.is_numeric_candidate()).then_some(p.numeric_score)
        })
        .ok_or(SeriesError::NoMetricColumn {
            threshold: CANDIDATE_THRESHOLD,
            column_count: profiles.len(),
            date_column,
        })?,
    };

    validate_override(profiles, date_column, metric_column)
}

/// Highest eligible score wins; a strictly-greater comparison keeps the
/// leftmost column on ties.
fn best_by<F>(profiles: &[ColumnProfile], score: F) -> Option<usize>
where
    F: Fn(&ColumnProfile) -> Option<f64>,
{
    let mut best: Option<(usize, f64)> = None;
    for profile in profiles {
        if let Some(s) = score(profile) {
            if best.map_or(true, |(_, bs)| s > bs) {
                best = Some((profile.index, s));
            }
        }
    }
    best.map(|(idx, _)| idx)
}

/// Re-validate a caller-supplied selection against the same invariants the
/// automatic path guarantees.
pub fn validate_override(
    profiles: &[ColumnProfile],
    date_column: usize,
    metric_column: usize,
) -> Result<ColumnSelection, SeriesError> {
    let invalid = |reason: String| SeriesError::InvalidOverride { reason };

    let date_profile = profiles
        .get(date_column)
        .ok_or_else(|| invalid(format!("date column {date_column} out of range")))?;
    let metric_profile = profiles
        .get(metric_column)
        .ok_or_else(|| invalid(format!("metric column {metric_column} out of range")))?;

    if date_column == metric_column {
        return Err(invalid(format!(
            "date and metric columns must be distinct (both {date_column})"
        )));
    }
    if !date_profile.is_date_candidate() {
        return Err(invalid(format!(
            "column {date_column} ({}) is not a date candidate (score {:.2} <= {CANDIDATE_THRESHOLD})",
            date_profile.header, date_profile.date_score
        )));
    }
    if !metric_profile.is_numeric_candidate() {
        return Err(invalid(format!(
            "column {metric_column} ({}) is not a numeric candidate (score {:.2} <= {CANDIDATE_THRESHOLD})",
            metric_profile.header, metric_profile.numeric_score
        )));
    }

    Ok(ColumnSelection {
        date_column,
        metric_column,
    })
}
