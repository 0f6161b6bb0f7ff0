//! Appointment date/time rules.
//!
//! Pipeline used by the UI shell: raw record → date/time parsing →
//! eligibility → display summary

mod date;
mod eligibility;
mod summary;
mod time;

pub use date::*;
pub use eligibility::*;
pub use summary::*;
pub use time::*;

use thiserror::Error;

/// Rule evaluation errors.
///
/// Display-facing operations turn these into sentinels; the typed variants
/// exist for callers that want to tell the user why input was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RulesError {
    #[error("Empty input")]
    EmptyInput,

    #[error("Unrecognized time: {0}")]
    UnrecognizedTime(String),

    #[error("Time out of range: {hour}:{minute:02}")]
    TimeOutOfRange { hour: u32, minute: u32 },

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Slot interval must be 1-1440 minutes, got {0}")]
    InvalidInterval(u32),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type RulesResult<T> = Result<T, RulesError>;
