//! Display summary for the appointment details view.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::config::RulesConfig;
use crate::models::{AppointmentRecord, AppointmentStatus};

use super::{format_us_date_with, normalize_manual_time};

/// Everything the details view renders about one appointment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentSummary {
    /// `month/day/year` or the placeholder
    pub date_display: String,
    /// Canonical time, or the raw text when it does not normalize
    pub time_display: Option<String>,
    pub status: Option<AppointmentStatus>,
    pub is_future_slot: bool,
    pub can_cancel: bool,
}

impl AppointmentSummary {
    /// Build the summary for a record at the given local time.
    pub fn build(record: &AppointmentRecord, now: NaiveDateTime, config: &RulesConfig) -> Self {
        let eligibility = config.eligibility.evaluate(record, now);

        let time_display = record
            .raw_time()
            .map(|raw| normalize_manual_time(raw).unwrap_or_else(|| raw.to_string()));

        Self {
            date_display: format_us_date_with(record.raw_date(), &config.date_placeholder),
            time_display,
            status: record.status.clone(),
            is_future_slot: eligibility.is_future_slot,
            can_cancel: eligibility.can_cancel,
        }
    }
}
