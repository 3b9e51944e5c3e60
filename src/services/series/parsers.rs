use chrono::{DateTime, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;

/// Formatting noise stripped before the decimal parse: currency markers,
/// thousands separators, whitespace. Kept in one place so the accepted set
/// stays auditable.
static NUMERIC_NOISE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"R\$|[$€£\s,]").expect("valid numeric noise pattern"));

/// Parse a metric cell, tolerating spreadsheet formatting like `$1,234.50`
/// or ` -12.3 `. Returns `None` for empty cells and anything that is not a
/// finite decimal after cleaning.
pub fn parse_numeric(cell: &str) -> Option<f64> {
    let cleaned = NUMERIC_NOISE.replace_all(cell, "");
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Minimum length for a cell to even be considered a date. Filters out stray
/// single digits and bare day-of-month values.
const MIN_DATE_LEN: usize = 4;

/// Date-only layouts tried after the datetime layouts. Ordered: ISO first,
/// then month-first slashes, then day-first dashes/dots. The order is the
/// tie-break for ambiguous strings like `03/04/2024`.
const DATE_FORMATS: [&str; 5] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d-%m-%Y", "%d.%m.%Y"];

const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Parse a date cell through a fixed fallback chain (RFC 3339, then the
/// layouts above). Returns the full timestamp; callers truncate to calendar
/// days after sorting.
pub fn parse_date(cell: &str) -> Option<NaiveDateTime> {
    let trimmed = cell.trim();
    if trimmed.len() < MIN_DATE_LEN {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.naive_utc());
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Some(dt);
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(trimmed, fmt) {
            return d.and_hms_opt(0, 0, 0);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_strips_currency_and_commas() {
        assert_eq!(parse_numeric("$1,234.50"), Some(1234.5));
        assert_eq!(parse_numeric("  -12.3 "), Some(-12.3));
        assert_eq!(parse_numeric("R$ 99"), Some(99.0));
    }

    #[test]
    fn numeric_rejects_noise() {
        assert_eq!(parse_numeric(""), None);
        assert_eq!(parse_numeric("  -- "), None);
        assert_eq!(parse_numeric("abc"), None);
        assert_eq!(parse_numeric("NaN"), None);
    }

    #[test]
    fn date_accepts_common_layouts() {
        assert!(parse_date("2024-01-05").is_some());
        assert!(parse_date("2024/01/05").is_some());
        assert!(parse_date("03/04/2024").is_some());
        assert!(parse_date("2024-01-05T12:30:00").is_some());
        assert!(parse_date("2024-01-05T12:30:00+02:00").is_some());
    }

    #[test]
    fn date_rejects_short_and_junk() {
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("7"), None);
        assert_eq!(parse_date("202"), None);
        assert_eq!(parse_date("hello world"), None);
    }

    #[test]
    fn ambiguous_slash_date_is_month_first() {
        let dt = parse_date("03/04/2024").unwrap();
        assert_eq!(dt.date(), NaiveDate::from_ymd_opt(2024, 3, 4).unwrap());
    }
}
