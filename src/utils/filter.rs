use chrono::NaiveDate;

pub const DEFAULT_LIMIT: i64 = 100;
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Applies list defaults: a missing or non-positive limit becomes
/// [`DEFAULT_LIMIT`], a missing or negative offset becomes zero.
pub fn normalize_pagination(limit: Option<i64>, offset: Option<i64>) -> (i64, i64) {
    let limit = match limit {
        Some(l) if l > 0 => l,
        _ => DEFAULT_LIMIT,
    };
    let offset = offset.unwrap_or(0).max(0);
    (limit, offset)
}

/// Parses a `YYYY-MM-DD` filter value. Empty or unparsable input means
/// "no filter", never an error.
pub fn parse_filter_date(value: Option<&str>) -> Option<NaiveDate> {
    let value = value?.trim();
    if value.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT).ok()
}

/// Turns an empty query-string value into `None`
pub fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
