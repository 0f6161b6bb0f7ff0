//! Future-slot and cancel eligibility.
//!
//! An appointment can be cancelled when:
//! - its slot is still in the future
//! - it is not seismified (locked)
//! - its status is not cancelled or completed

use chrono::{NaiveDateTime, Timelike};
use log::warn;
use serde::{Deserialize, Serialize};

use crate::models::{AppointmentRecord, AppointmentStatus, Eligibility};

use super::{calendar_date, parse_stored_time};

/// Rules deciding whether an appointment may be cancelled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EligibilityPolicy {
    /// Statuses that can no longer be cancelled
    pub blocking_statuses: Vec<AppointmentStatus>,
    /// Whether a seismified (locked) appointment blocks cancellation
    pub seismified_blocks_cancel: bool,
}

impl Default for EligibilityPolicy {
    fn default() -> Self {
        Self {
            blocking_statuses: vec![AppointmentStatus::Cancelled, AppointmentStatus::Completed],
            seismified_blocks_cancel: true,
        }
    }
}

impl EligibilityPolicy {
    /// Derive eligibility flags for a record at the given local time.
    pub fn evaluate(&self, record: &AppointmentRecord, now: NaiveDateTime) -> Eligibility {
        let is_future_slot = is_future_slot(record, now);

        let locked = self.seismified_blocks_cancel && record.seismified;
        let blocked_status = record
            .status
            .as_ref()
            .map(|status| self.blocking_statuses.contains(status))
            .unwrap_or(false);

        Eligibility {
            is_future_slot,
            can_cancel: is_future_slot && !locked && !blocked_status,
        }
    }
}

/// Derive eligibility flags with the default policy.
pub fn derive_eligibility(record: &AppointmentRecord, now: NaiveDateTime) -> Eligibility {
    EligibilityPolicy::default().evaluate(record, now)
}

/// The appointment's local date and time.
///
/// Midnight of the appointment date when the record has no usable time.
/// `None` when the record has no parseable date.
pub fn appointment_instant(record: &AppointmentRecord) -> Option<NaiveDateTime> {
    let raw_date = record.raw_date()?;
    let date = match calendar_date(raw_date) {
        Ok(date) => date,
        Err(e) => {
            warn!("Appointment {:?} has unusable date: {}", record.id, e);
            return None;
        }
    };

    let midnight = date.and_hms_opt(0, 0, 0)?;
    let Some(raw_time) = record.raw_time() else {
        return Some(midnight);
    };

    match parse_stored_time(raw_time) {
        Ok(time) => Some(date.and_time(time.to_naive_time())),
        Err(e) => {
            warn!(
                "Appointment {:?} time {:?} not overlaid: {}",
                record.id, raw_time, e
            );
            Some(midnight)
        }
    }
}

/// Check if the appointment slot is still ahead of `now`.
///
/// Same-day appointments compare the exact time against `now` truncated to
/// the minute; other days compare calendar dates only.
pub fn is_future_slot(record: &AppointmentRecord, now: NaiveDateTime) -> bool {
    let Some(appointment) = appointment_instant(record) else {
        return false;
    };

    let now = now
        .with_second(0)
        .and_then(|n| n.with_nanosecond(0))
        .unwrap_or(now);

    if appointment.date() == now.date() {
        appointment > now
    } else {
        appointment.date() > now.date()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    fn record(date: &str, time: Option<&str>) -> AppointmentRecord {
        AppointmentRecord {
            time: time.map(String::from),
            ..AppointmentRecord::scheduled(date)
        }
    }

    #[test]
    fn test_missing_date_is_not_future() {
        let record = AppointmentRecord::default();
        let flags = derive_eligibility(&record, at(2024, 3, 5, 9, 0, 0));
        assert_eq!(flags, Eligibility::default());
    }

    #[test]
    fn test_unparseable_date_is_not_future() {
        let flags = derive_eligibility(&record("05/03/2024", None), at(2024, 3, 1, 9, 0, 0));
        assert!(!flags.is_future_slot);
    }

    #[test]
    fn test_past_and_future_days() {
        let now = at(2024, 3, 5, 9, 0, 0);
        assert!(!is_future_slot(&record("2024-03-04", Some("23:59")), now));
        assert!(is_future_slot(&record("2024-03-06", Some("00:01")), now));
        assert!(is_future_slot(&record("2024-03-06T00:00:00.000Z", None), now));
    }

    #[test]
    fn test_same_day_compares_time() {
        let now = at(2024, 3, 5, 14, 30, 45);
        assert!(is_future_slot(&record("2024-03-05", Some("14:31")), now));
        // Seconds are dropped from now, so the same minute is not future
        assert!(!is_future_slot(&record("2024-03-05", Some("14:30")), now));
        assert!(!is_future_slot(&record("2024-03-05", Some("9:00")), now));
    }

    #[test]
    fn test_same_day_without_time_is_past() {
        let now = at(2024, 3, 5, 0, 0, 30);
        assert!(!is_future_slot(&record("2024-03-05", None), now));
    }

    #[test]
    fn test_twelve_hour_time_overlay() {
        let now = at(2024, 3, 5, 12, 0, 0);
        assert!(is_future_slot(&record("2024-03-05", Some("3:30 PM")), now));
        assert!(!is_future_slot(&record("2024-03-05", Some("11:30 AM")), now));
    }

    #[test]
    fn test_invalid_time_falls_back_to_midnight() {
        let record = record("2024-03-05", Some("after lunch"));
        assert_eq!(appointment_instant(&record), Some(at(2024, 3, 5, 0, 0, 0)));
    }

    #[test]
    fn test_cancel_rules() {
        let now = at(2024, 3, 5, 9, 0, 0);
        let upcoming = record("2024-03-05", Some("10:00"));

        let flags = derive_eligibility(&upcoming, now);
        assert!(flags.is_future_slot);
        assert!(flags.can_cancel);

        let locked = AppointmentRecord {
            seismified: true,
            ..upcoming.clone()
        };
        assert!(!derive_eligibility(&locked, now).can_cancel);

        let cancelled = AppointmentRecord {
            status: Some(AppointmentStatus::Cancelled),
            ..upcoming.clone()
        };
        let flags = derive_eligibility(&cancelled, now);
        assert!(flags.is_future_slot);
        assert!(!flags.can_cancel);

        let completed = AppointmentRecord {
            status: Some(AppointmentStatus::Completed),
            ..upcoming.clone()
        };
        assert!(!derive_eligibility(&completed, now).can_cancel);

        let unknown = AppointmentRecord {
            status: None,
            ..upcoming
        };
        assert!(derive_eligibility(&unknown, now).can_cancel);
    }

    #[test]
    fn test_custom_policy() {
        let now = at(2024, 3, 5, 9, 0, 0);
        let policy = EligibilityPolicy {
            blocking_statuses: vec![AppointmentStatus::Other("checked-in".into())],
            seismified_blocks_cancel: false,
        };

        let locked = AppointmentRecord {
            seismified: true,
            ..record("2024-03-06", None)
        };
        assert!(policy.evaluate(&locked, now).can_cancel);

        let checked_in = AppointmentRecord {
            status: Some(AppointmentStatus::from("Checked-In")),
            ..record("2024-03-06", None)
        };
        assert!(!policy.evaluate(&checked_in, now).can_cancel);
    }
}
