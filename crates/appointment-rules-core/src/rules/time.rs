//! Time normalization for manual entry and slot lists.
//!
//! Handles:
//! - Meridiem cleanup (`a.m.` → `AM`, `3:30pm` → `3:30 PM`)
//! - 12-hour and 24-hour clock input
//! - Canonical `H:MM AM|PM` rendering
//!
//! Every canonical string is produced by [`format_time_for_display`], so
//! manual entries and generated slots always look the same.

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::{TimeOfDay, MINUTES_PER_DAY};

use super::{RulesError, RulesResult};

/// Default spacing of the dropdown slots.
pub const DEFAULT_SLOT_INTERVAL_MINUTES: u32 = 15;

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));

/// `3:30PM` with no space before the meridiem.
static MISSING_MERIDIEM_SPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9]{1,2}:[0-9]{2})(AM|PM)$").expect("valid regex"));

static TWELVE_HOUR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9]{1,2}):([0-9]{2}) (AM|PM)$").expect("valid regex"));

static TWENTY_FOUR_HOUR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9]{1,2}):([0-9]{2})$").expect("valid regex"));

/// Stored backend times may carry seconds (`14:30:00`).
static STORED_24_HOUR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9]{1,2}):([0-9]{2})(?::[0-9]{2})?$").expect("valid regex"));

/// Render a 24-hour clock time as `H:MM AM|PM`.
///
/// Callers validate the range first; out-of-range values produce an
/// unspecified (but non-panicking) string.
pub fn format_time_for_display(hour24: u32, minute: u32) -> String {
    let meridiem = if hour24 % 24 >= 12 { "PM" } else { "AM" };
    let hour12 = match hour24 % 12 {
        0 => 12,
        h => h,
    };
    format!("{}:{:02} {}", hour12, minute, meridiem)
}

/// Normalize typed time text to the canonical display string.
///
/// Returns `None` when the text is not a recognizable clock time.
pub fn normalize_manual_time(input: &str) -> Option<String> {
    match parse_manual_time(input) {
        Ok(time) => Some(time.to_string()),
        Err(e) => {
            debug!("Rejected manual time {:?}: {}", input, e);
            None
        }
    }
}

/// Trim, uppercase and drop periods (`a.m.` → `AM`).
///
/// Only the original text is trimmed; spaces left next to a removed period
/// stay in place.
pub fn clean_time_text(input: &str) -> String {
    input.trim().to_uppercase().replace('.', "")
}

/// Parse typed time text, reporting why it was rejected.
pub fn parse_manual_time(input: &str) -> RulesResult<TimeOfDay> {
    let cleaned = clean_time_text(input);
    if cleaned.is_empty() {
        return Err(RulesError::EmptyInput);
    }

    let collapsed = WHITESPACE_RUN.replace_all(&cleaned, " ");
    let spaced = MISSING_MERIDIEM_SPACE.replace(&collapsed, "$1 $2");

    if let Some(caps) = TWELVE_HOUR.captures(&spaced) {
        let hour = parse_field(&caps[1], input)?;
        let minute = parse_field(&caps[2], input)?;
        return TimeOfDay::from_12_hour(hour, minute, &caps[3] == "PM");
    }

    if let Some(caps) = TWENTY_FOUR_HOUR.captures(&spaced) {
        let hour = parse_field(&caps[1], input)?;
        let minute = parse_field(&caps[2], input)?;
        return TimeOfDay::new(hour, minute);
    }

    Err(RulesError::UnrecognizedTime(input.to_string()))
}

/// Parse the `time` field stored on an appointment record.
///
/// Accepts 24-hour `H:MM` / `H:MM:SS` and anything [`parse_manual_time`]
/// accepts, so a canonical `3:30 PM` is read as 15:30.
pub fn parse_stored_time(raw: &str) -> RulesResult<TimeOfDay> {
    let trimmed = raw.trim();
    if let Some(caps) = STORED_24_HOUR.captures(trimmed) {
        let hour = parse_field(&caps[1], raw)?;
        let minute = parse_field(&caps[2], raw)?;
        return TimeOfDay::new(hour, minute);
    }
    parse_manual_time(trimmed)
}

fn parse_field(digits: &str, input: &str) -> RulesResult<u32> {
    digits
        .parse()
        .map_err(|_| RulesError::UnrecognizedTime(input.to_string()))
}

/// Generate dropdown slots across the whole day, starting at midnight.
pub fn time_slots(interval_minutes: u32) -> RulesResult<Vec<TimeOfDay>> {
    if interval_minutes == 0 || interval_minutes > MINUTES_PER_DAY {
        return Err(RulesError::InvalidInterval(interval_minutes));
    }

    (0..MINUTES_PER_DAY)
        .step_by(interval_minutes as usize)
        .map(TimeOfDay::from_minutes)
        .collect()
}

/// The 96 canonical quarter-hour slots, `12:00 AM` through `11:45 PM`.
pub fn quarter_hour_slots() -> Vec<String> {
    (0..MINUTES_PER_DAY)
        .step_by(DEFAULT_SLOT_INTERVAL_MINUTES as usize)
        .map(|minutes| format_time_for_display(minutes / 60, minutes % 60))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_format_time_for_display() {
        assert_eq!(format_time_for_display(0, 0), "12:00 AM");
        assert_eq!(format_time_for_display(9, 5), "9:05 AM");
        assert_eq!(format_time_for_display(12, 0), "12:00 PM");
        assert_eq!(format_time_for_display(13, 7), "1:07 PM");
        assert_eq!(format_time_for_display(23, 59), "11:59 PM");
    }

    #[test]
    fn test_normalize_twelve_hour() {
        assert_eq!(normalize_manual_time("3:30 PM").as_deref(), Some("3:30 PM"));
        assert_eq!(normalize_manual_time("12:45PM").as_deref(), Some("12:45 PM"));
        assert_eq!(normalize_manual_time("  9:05   am ").as_deref(), Some("9:05 AM"));
        assert_eq!(normalize_manual_time("10:15 a.m.").as_deref(), Some("10:15 AM"));
        assert_eq!(normalize_manual_time("08:00 pm").as_deref(), Some("8:00 PM"));
    }

    #[test]
    fn test_normalize_twenty_four_hour() {
        assert_eq!(normalize_manual_time("15:30").as_deref(), Some("3:30 PM"));
        assert_eq!(normalize_manual_time("00:00").as_deref(), Some("12:00 AM"));
        assert_eq!(normalize_manual_time("12:00").as_deref(), Some("12:00 PM"));
        assert_eq!(normalize_manual_time("7:05").as_deref(), Some("7:05 AM"));
    }

    #[test]
    fn test_midnight_and_noon_boundaries() {
        assert_eq!(normalize_manual_time("12:00 AM").as_deref(), Some("12:00 AM"));
        assert_eq!(normalize_manual_time("12:00 PM").as_deref(), Some("12:00 PM"));
        assert_eq!(parse_manual_time("12:00 AM").unwrap().hour(), 0);
        assert_eq!(parse_manual_time("12:00 PM").unwrap().hour(), 12);
    }

    #[test]
    fn test_normalize_rejects() {
        assert_eq!(normalize_manual_time(""), None);
        assert_eq!(normalize_manual_time("   "), None);
        assert_eq!(normalize_manual_time("13:61"), None);
        assert_eq!(normalize_manual_time("24:00"), None);
        assert_eq!(normalize_manual_time("13:00 PM"), None);
        assert_eq!(normalize_manual_time("0:30 AM"), None);
        assert_eq!(normalize_manual_time("3pm"), None);
        assert_eq!(normalize_manual_time("3:5 PM"), None);
        assert_eq!(normalize_manual_time("noon"), None);
        // Spaces exposed by removing a period are not trimmed again
        assert_eq!(normalize_manual_time(". 3:30 PM"), None);
        assert_eq!(normalize_manual_time("3:30 P.M ."), None);
    }

    #[test]
    fn test_parse_manual_time_reasons() {
        assert_eq!(parse_manual_time(" "), Err(RulesError::EmptyInput));
        assert_eq!(
            parse_manual_time("13:61"),
            Err(RulesError::TimeOutOfRange { hour: 13, minute: 61 })
        );
        assert!(matches!(
            parse_manual_time("half past"),
            Err(RulesError::UnrecognizedTime(_))
        ));
    }

    #[test]
    fn test_clean_time_text() {
        assert_eq!(clean_time_text("  7:15 p.m. "), "7:15 PM");
        assert_eq!(clean_time_text(". 3:30 pm"), " 3:30 PM");
        assert_eq!(clean_time_text("3:30 PM ."), "3:30 PM ");
    }

    #[test]
    fn test_parse_stored_time() {
        assert_eq!(parse_stored_time("14:30").unwrap().to_string(), "2:30 PM");
        assert_eq!(parse_stored_time("09:00:00").unwrap().to_string(), "9:00 AM");
        assert_eq!(parse_stored_time("3:30 PM").unwrap().hour(), 15);
        assert!(parse_stored_time("25:00").is_err());
        assert!(parse_stored_time("soon").is_err());
    }

    #[test]
    fn test_quarter_hour_slots() {
        let slots = quarter_hour_slots();
        assert_eq!(slots.len(), 96);
        assert_eq!(slots.first().map(String::as_str), Some("12:00 AM"));
        assert_eq!(slots[1], "12:15 AM");
        assert_eq!(slots[48], "12:00 PM");
        assert_eq!(slots.last().map(String::as_str), Some("11:45 PM"));
    }

    #[test]
    fn test_time_slots_intervals() {
        assert_eq!(time_slots(60).unwrap().len(), 24);
        assert_eq!(time_slots(1440).unwrap(), vec![TimeOfDay::MIDNIGHT]);
        // Uneven intervals stop before midnight
        assert_eq!(time_slots(7).unwrap().len(), 206);
        assert_eq!(time_slots(0), Err(RulesError::InvalidInterval(0)));
        assert_eq!(time_slots(1441), Err(RulesError::InvalidInterval(1441)));
    }

    proptest! {
        #[test]
        fn prop_canonical_round_trip(hour in 0u32..24, minute in 0u32..60) {
            let canonical = format_time_for_display(hour, minute);
            let renormalized = normalize_manual_time(&canonical);
            prop_assert_eq!(renormalized.as_deref(), Some(canonical.as_str()));

            let parsed = parse_manual_time(&canonical).unwrap();
            prop_assert_eq!((parsed.hour(), parsed.minute()), (hour, minute));
        }

        #[test]
        fn prop_twenty_four_hour_matches_twelve_hour(hour in 0u32..24, minute in 0u32..60) {
            let typed = format!("{:02}:{:02}", hour, minute);
            prop_assert_eq!(
                normalize_manual_time(&typed),
                Some(format_time_for_display(hour, minute))
            );
        }

        #[test]
        fn prop_never_panics(input in ".{0,16}") {
            let _ = normalize_manual_time(&input);
        }
    }
}
