//! Time-of-day model.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::rules::{format_time_for_display, parse_manual_time, RulesError, RulesResult};

/// Minutes in one day.
pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// A wall-clock time with minute precision.
///
/// Always in range: hour 0–23, minute 0–59. `Display` renders the canonical
/// 12-hour form (`9:05 AM`), which is also the serialized form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay {
    /// Hour on the 24-hour clock
    hour: u32,
    /// Minute of the hour
    minute: u32,
}

impl TimeOfDay {
    /// Midnight (`12:00 AM`).
    pub const MIDNIGHT: TimeOfDay = TimeOfDay { hour: 0, minute: 0 };

    /// Create a time from 24-hour clock fields.
    pub fn new(hour: u32, minute: u32) -> RulesResult<Self> {
        if hour > 23 || minute > 59 {
            return Err(RulesError::TimeOutOfRange { hour, minute });
        }
        Ok(Self { hour, minute })
    }

    /// Create a time from 12-hour clock fields (hour 1–12).
    pub fn from_12_hour(hour: u32, minute: u32, pm: bool) -> RulesResult<Self> {
        if !(1..=12).contains(&hour) || minute > 59 {
            return Err(RulesError::TimeOutOfRange { hour, minute });
        }
        let hour24 = hour % 12 + if pm { 12 } else { 0 };
        Ok(Self {
            hour: hour24,
            minute,
        })
    }

    /// Create a time from minutes since midnight.
    pub fn from_minutes(minutes: u32) -> RulesResult<Self> {
        if minutes >= MINUTES_PER_DAY {
            return Err(RulesError::TimeOutOfRange {
                hour: minutes / 60,
                minute: minutes % 60,
            });
        }
        Ok(Self {
            hour: minutes / 60,
            minute: minutes % 60,
        })
    }

    pub fn hour(&self) -> u32 {
        self.hour
    }

    pub fn minute(&self) -> u32 {
        self.minute
    }

    /// Minutes elapsed since midnight.
    pub fn minutes_since_midnight(&self) -> u32 {
        self.hour * 60 + self.minute
    }

    /// Convert to a chrono time for calendar arithmetic.
    pub fn to_naive_time(&self) -> chrono::NaiveTime {
        // Fields are range-checked on construction.
        chrono::NaiveTime::from_hms_opt(self.hour, self.minute, 0).unwrap_or_default()
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_time_for_display(self.hour, self.minute))
    }
}

impl FromStr for TimeOfDay {
    type Err = RulesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_manual_time(s)
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = RulesError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TimeOfDay> for String {
    fn from(time: TimeOfDay) -> Self {
        time.to_string()
    }
}
