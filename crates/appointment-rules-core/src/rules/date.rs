//! Date formatting and parsing.
//!
//! `format_us_date` is deliberately non-validating: any three non-empty
//! dash-separated tokens are rearranged verbatim. Use [`calendar_date`] when
//! the value has to be a real date.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use log::debug;

use super::{RulesError, RulesResult};

/// Shown when no date is available.
pub const DATE_PLACEHOLDER: &str = "—";

/// Format a date string as `month/day/year` for display.
///
/// Returns [`DATE_PLACEHOLDER`] for missing or incomplete input.
pub fn format_us_date(raw: Option<&str>) -> String {
    format_us_date_with(raw, DATE_PLACEHOLDER)
}

/// Format a date string as `month/day/year`, using a custom placeholder.
pub fn format_us_date_with(raw: Option<&str>, placeholder: &str) -> String {
    let Some(raw) = raw.filter(|r| !r.is_empty()) else {
        return placeholder.to_string();
    };

    let mut parts = strip_time_suffix(raw).split('-');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(year), Some(month), Some(day))
            if !year.is_empty() && !month.is_empty() && !day.is_empty() =>
        {
            format!("{}/{}/{}", month, day, year)
        }
        _ => {
            debug!("Incomplete date {:?}, showing placeholder", raw);
            placeholder.to_string()
        }
    }
}

/// Drop any time-of-day component (everything from the first `T`).
pub fn strip_time_suffix(raw: &str) -> &str {
    raw.split('T').next().unwrap_or(raw)
}

/// Parse the calendar date of an ISO or `yyyy-mm-dd` value.
pub fn calendar_date(raw: &str) -> RulesResult<NaiveDate> {
    let date_part = strip_time_suffix(raw.trim());
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .map_err(|_| RulesError::InvalidDate(raw.to_string()))
}

/// Canonical `yyyy-mm-dd` for a date input field, if the value is a real date.
pub fn to_input_date(raw: Option<&str>) -> Option<String> {
    let raw = raw.filter(|r| !r.trim().is_empty())?;
    calendar_date(raw)
        .map(|date| date.format("%Y-%m-%d").to_string())
        .ok()
}

/// Parse a local wall-clock instant.
///
/// Accepts `yyyy-mm-ddTHH:MM[:SS[.fff]]` (local time, `T` or space separated)
/// and RFC 3339 timestamps, which are converted to the local time zone.
pub fn parse_local_instant(raw: &str) -> RulesResult<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(RulesError::EmptyInput);
    }

    const LOCAL_FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
    ];

    for format in LOCAL_FORMATS {
        if let Ok(instant) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(instant);
        }
    }

    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Local).naive_local())
        .map_err(|_| RulesError::InvalidDate(raw.to_string()))
}
