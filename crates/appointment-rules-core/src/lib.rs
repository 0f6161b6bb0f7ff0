//! Appointment Rules Core Library
//!
//! Pure date/time rules behind the appointment management UI.
//!
//! # Architecture
//!
//! ```text
//!   Backend JSON ──► AppointmentRecord
//!                          │
//!          ┌───────────────┼────────────────┐
//!          ▼               ▼                ▼
//!   format_us_date   parse_stored_time   status / seismified
//!          │               │                │
//!          │               └──────┬─────────┘
//!          │                      ▼
//!          │              EligibilityPolicy ──► { isFutureSlot, canCancel }
//!          │                      │
//!          └──────────► AppointmentSummary ──► details view
//!
//!   Typed text ──► normalize_manual_time ──► format_time_for_display ◄── slot list
//!                          │
//!                   TimePickerState (reduce)
//! ```
//!
//! # Core Principle
//!
//! **No I/O, no shared state.** Every rule is a function of its inputs; "now"
//! is always passed in. Invalid input yields a sentinel (`"—"` or `None`)
//! rather than an error at the display boundary.
//!
//! # Modules
//!
//! - [`models`]: Domain types (TimeOfDay, AppointmentRecord, Eligibility)
//! - [`rules`]: Date formatting, time normalization, eligibility, summaries
//! - [`picker`]: Time dropdown state reducer
//! - [`config`]: Rule configuration

pub mod config;
pub mod models;
pub mod picker;
pub mod rules;

// Re-export commonly used types
pub use config::RulesConfig;
pub use models::{AppointmentId, AppointmentRecord, AppointmentStatus, Eligibility, TimeOfDay};
pub use picker::{TimePickerAction, TimePickerState};
pub use rules::{
    derive_eligibility, format_time_for_display, format_us_date, normalize_manual_time,
    quarter_hour_slots, AppointmentSummary, EligibilityPolicy, RulesError, RulesResult,
};

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::sync::Arc;

use chrono::NaiveDateTime;

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum AppointmentRulesError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Config error: {0}")]
    ConfigError(String),
}

impl From<RulesError> for AppointmentRulesError {
    fn from(e: RulesError) -> Self {
        match e {
            RulesError::Config(_) | RulesError::InvalidInterval(_) => {
                AppointmentRulesError::ConfigError(e.to_string())
            }
            _ => AppointmentRulesError::InvalidInput(e.to_string()),
        }
    }
}

impl From<serde_json::Error> for AppointmentRulesError {
    fn from(e: serde_json::Error) -> Self {
        AppointmentRulesError::SerializationError(e.to_string())
    }
}

// =========================================================================
// Factory Functions (exported to FFI)
// =========================================================================

/// Rules with default settings.
#[uniffi::export]
pub fn default_rules() -> Arc<AppointmentRules> {
    Arc::new(AppointmentRules::new(RulesConfig::default()))
}

/// Rules configured from a JSON document.
#[uniffi::export]
pub fn rules_from_config_json(json: String) -> Result<Arc<AppointmentRules>, AppointmentRulesError> {
    let config = RulesConfig::from_json(&json)?;
    Ok(Arc::new(AppointmentRules::new(config)))
}

// =========================================================================
// Main API Object
// =========================================================================

/// Configured rule set handed to the UI shell.
#[derive(uniffi::Object)]
pub struct AppointmentRules {
    config: RulesConfig,
}

impl AppointmentRules {
    pub fn new(config: RulesConfig) -> Self {
        Self { config }
    }
}

#[uniffi::export]
impl AppointmentRules {
    // =========================================================================
    // Formatting
    // =========================================================================

    /// Format a date as `month/day/year`, or the placeholder.
    pub fn format_us_date(&self, raw: Option<String>) -> String {
        rules::format_us_date_with(raw.as_deref(), &self.config.date_placeholder)
    }

    /// Canonical `H:MM AM|PM` for a validated 24-hour time.
    pub fn format_time_for_display(
        &self,
        hour24: u32,
        minute: u32,
    ) -> Result<String, AppointmentRulesError> {
        let time = TimeOfDay::new(hour24, minute)?;
        Ok(time.to_string())
    }

    /// Normalize typed time text; `None` when it is not a valid time.
    pub fn normalize_manual_time(&self, input: String) -> Option<String> {
        rules::normalize_manual_time(&input)
    }

    /// Dropdown slots at the configured interval.
    pub fn time_slots(&self) -> Result<Vec<String>, AppointmentRulesError> {
        let slots = rules::time_slots(self.config.slot_interval_minutes)?;
        Ok(slots.into_iter().map(|s| s.to_string()).collect())
    }

    /// `yyyy-mm-dd` for the edit form's date input.
    pub fn to_input_date(&self, raw: Option<String>) -> Option<String> {
        rules::to_input_date(raw.as_deref())
    }

    // =========================================================================
    // Eligibility
    // =========================================================================

    /// Derive eligibility flags. `now` defaults to the local clock.
    pub fn derive_eligibility(
        &self,
        record: FfiAppointment,
        now: Option<String>,
    ) -> Result<FfiEligibility, AppointmentRulesError> {
        let now = resolve_now(now)?;
        let record: AppointmentRecord = record.into();
        Ok(self.config.eligibility.evaluate(&record, now).into())
    }

    /// Derive eligibility flags for a raw backend JSON record.
    pub fn derive_eligibility_json(
        &self,
        record_json: String,
        now: Option<String>,
    ) -> Result<FfiEligibility, AppointmentRulesError> {
        let now = resolve_now(now)?;
        let record = AppointmentRecord::from_json(&record_json)?;
        Ok(self.config.eligibility.evaluate(&record, now).into())
    }

    /// Build the details view summary.
    pub fn summarize(
        &self,
        record: FfiAppointment,
        now: Option<String>,
    ) -> Result<FfiAppointmentSummary, AppointmentRulesError> {
        let now = resolve_now(now)?;
        let record: AppointmentRecord = record.into();
        Ok(AppointmentSummary::build(&record, now, &self.config).into())
    }
}

fn resolve_now(now: Option<String>) -> Result<NaiveDateTime, AppointmentRulesError> {
    match now {
        Some(raw) => Ok(rules::parse_local_instant(&raw)?),
        None => Ok(chrono::Local::now().naive_local()),
    }
}

// =========================================================================
// FFI Types
// =========================================================================

/// FFI-safe appointment record.
#[derive(Debug, Clone, Default, uniffi::Record)]
pub struct FfiAppointment {
    pub id: Option<String>,
    pub appointment_date: Option<String>,
    pub date: Option<String>,
    pub appointment_date_camel: Option<String>,
    pub time: Option<String>,
    pub status: Option<String>,
    pub seismified: bool,
    pub patient_id: Option<String>,
    pub patient_name: Option<String>,
    pub doctor_id: Option<String>,
    pub doctor_name: Option<String>,
}

impl From<FfiAppointment> for AppointmentRecord {
    fn from(record: FfiAppointment) -> Self {
        AppointmentRecord {
            id: record.id.map(AppointmentId::Text),
            appointment_date: record.appointment_date,
            date: record.date,
            appointment_date_camel: record.appointment_date_camel,
            time: record.time,
            status: record.status.map(AppointmentStatus::from),
            seismified: record.seismified,
            patient_id: record.patient_id.map(AppointmentId::Text),
            patient_name: record.patient_name,
            doctor_id: record.doctor_id.map(AppointmentId::Text),
            doctor_name: record.doctor_name,
        }
    }
}

impl From<AppointmentRecord> for FfiAppointment {
    fn from(record: AppointmentRecord) -> Self {
        Self {
            id: record.id.map(|id| id.to_string()),
            appointment_date: record.appointment_date,
            date: record.date,
            appointment_date_camel: record.appointment_date_camel,
            time: record.time,
            status: record.status.map(String::from),
            seismified: record.seismified,
            patient_id: record.patient_id.map(|id| id.to_string()),
            patient_name: record.patient_name,
            doctor_id: record.doctor_id.map(|id| id.to_string()),
            doctor_name: record.doctor_name,
        }
    }
}

/// FFI-safe eligibility flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Record)]
pub struct FfiEligibility {
    pub is_future_slot: bool,
    pub can_cancel: bool,
}

impl From<Eligibility> for FfiEligibility {
    fn from(flags: Eligibility) -> Self {
        Self {
            is_future_slot: flags.is_future_slot,
            can_cancel: flags.can_cancel,
        }
    }
}

/// FFI-safe details view summary.
#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct FfiAppointmentSummary {
    pub date_display: String,
    pub time_display: Option<String>,
    pub status: Option<String>,
    pub is_future_slot: bool,
    pub can_cancel: bool,
}

impl From<AppointmentSummary> for FfiAppointmentSummary {
    fn from(summary: AppointmentSummary) -> Self {
        Self {
            date_display: summary.date_display,
            time_display: summary.time_display,
            status: summary.status.map(String::from),
            is_future_slot: summary.is_future_slot,
            can_cancel: summary.can_cancel,
        }
    }
}
