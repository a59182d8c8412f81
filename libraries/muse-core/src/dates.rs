//! Creation-date normalization.
//!
//! Dates travel as plain `YYYY-MM-DD` strings. The server sometimes returns full
//! timestamps; those are reduced to their UTC calendar date so a value never
//! drifts across a timezone boundary when it is edited and sent back.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Wire and form format for calendar dates
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a date as the server may send it.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, DATE_FORMAT) {
        return Some(date);
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc).date_naive());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|dt| dt.date())
}

/// Format a raw date for a form field: `YYYY-MM-DD`, or empty when unparsable.
pub fn format_for_input(raw: &str) -> String {
    parse_date(raw)
        .map(|d| d.format(DATE_FORMAT).to_string())
        .unwrap_or_default()
}

/// Parse a form field value, accepting only the strict `YYYY-MM-DD` form.
pub fn parse_input(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).ok()
}
