//! Appointment records as delivered by the backend.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Appointment identifier. The backend sends either a number or a string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AppointmentId {
    Number(i64),
    Text(String),
}

impl fmt::Display for AppointmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppointmentId::Number(n) => write!(f, "{}", n),
            AppointmentId::Text(s) => f.write_str(s),
        }
    }
}

/// Appointment lifecycle status.
///
/// Only the backend moves an appointment between states; the rules here
/// read the status but never change it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AppointmentStatus {
    /// Booked and upcoming
    Scheduled,
    /// Cancelled by staff or patient
    Cancelled,
    /// Visit took place
    Completed,
    /// Any status this crate does not model (kept lowercase)
    Other(String),
}

impl AppointmentStatus {
    /// Wire representation.
    pub fn as_str(&self) -> &str {
        match self {
            AppointmentStatus::Scheduled => "scheduled",
            AppointmentStatus::Cancelled => "cancelled",
            AppointmentStatus::Completed => "completed",
            AppointmentStatus::Other(s) => s,
        }
    }
}

impl From<&str> for AppointmentStatus {
    fn from(value: &str) -> Self {
        let lower = value.trim().to_lowercase();
        match lower.as_str() {
            "scheduled" => AppointmentStatus::Scheduled,
            "cancelled" => AppointmentStatus::Cancelled,
            "completed" => AppointmentStatus::Completed,
            _ => AppointmentStatus::Other(lower),
        }
    }
}

impl From<String> for AppointmentStatus {
    fn from(value: String) -> Self {
        AppointmentStatus::from(value.as_str())
    }
}

impl From<AppointmentStatus> for String {
    fn from(status: AppointmentStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An appointment as read from the backend API.
///
/// The date can arrive under three different field names depending on which
/// endpoint produced the record. Unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppointmentRecord {
    #[serde(default)]
    pub id: Option<AppointmentId>,
    /// Date as `yyyy-mm-dd` or full ISO timestamp
    #[serde(default)]
    pub appointment_date: Option<String>,
    /// Legacy date field
    #[serde(default)]
    pub date: Option<String>,
    /// camelCase date field
    #[serde(default, rename = "appointmentDate")]
    pub appointment_date_camel: Option<String>,
    /// Time of day, canonical `H:MM AM|PM` or 24-hour `HH:MM`
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub status: Option<AppointmentStatus>,
    /// Finalized/locked by the clinic; no further changes allowed
    #[serde(default)]
    pub seismified: bool,
    #[serde(default)]
    pub patient_id: Option<AppointmentId>,
    #[serde(default)]
    pub patient_name: Option<String>,
    #[serde(default)]
    pub doctor_id: Option<AppointmentId>,
    #[serde(default)]
    pub doctor_name: Option<String>,
}

impl AppointmentRecord {
    /// Create a scheduled appointment on a date.
    pub fn scheduled(date: impl Into<String>) -> Self {
        Self {
            appointment_date: Some(date.into()),
            status: Some(AppointmentStatus::Scheduled),
            ..Default::default()
        }
    }

    /// Parse a record from backend JSON.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// The raw date value, taken from the first non-empty date field.
    ///
    /// Priority: `appointment_date`, `date`, `appointmentDate`.
    pub fn raw_date(&self) -> Option<&str> {
        [
            &self.appointment_date,
            &self.date,
            &self.appointment_date_camel,
        ]
        .into_iter()
        .filter_map(|field| field.as_deref())
        .find(|value| !value.is_empty())
    }

    /// The raw time value, if non-empty.
    pub fn raw_time(&self) -> Option<&str> {
        self.time.as_deref().filter(|t| !t.trim().is_empty())
    }
}

/// Derived eligibility flags for an appointment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Eligibility {
    /// Slot is still ahead of "now"
    pub is_future_slot: bool,
    /// Appointment may be cancelled from the UI
    pub can_cancel: bool,
}
