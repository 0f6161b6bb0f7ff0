//! Time dropdown state.
//!
//! The host UI owns a [`TimePickerState`] and feeds user events through
//! [`reduce`]; the returned state is what it renders next.

use serde::{Deserialize, Serialize};

use crate::models::TimeOfDay;
use crate::rules::{clean_time_text, parse_manual_time};

/// Validation message shown when manual entry does not parse.
pub const INVALID_TIME_MESSAGE: &str = "Enter a time like 9:30 AM or 14:30";

/// Current state of a time dropdown.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimePickerState {
    /// Text currently in the input box
    pub input: String,
    /// Last accepted time
    pub value: Option<TimeOfDay>,
    /// Validation message for the last commit
    pub error: Option<String>,
    /// Whether the slot list is showing
    pub open: bool,
}

impl TimePickerState {
    /// Start from an existing value (e.g. when editing an appointment).
    pub fn with_value(value: Option<TimeOfDay>) -> Self {
        Self {
            input: value.map(|v| v.to_string()).unwrap_or_default(),
            value,
            error: None,
            open: false,
        }
    }

    /// Canonical string of the accepted value.
    pub fn display_value(&self) -> Option<String> {
        self.value.map(|v| v.to_string())
    }
}

/// User events on a time dropdown.
#[derive(Debug, Clone, PartialEq)]
pub enum TimePickerAction {
    Open,
    Close,
    /// Text typed into the input
    Edit(String),
    /// Slot picked from the list
    Choose(TimeOfDay),
    /// Input confirmed (blur or Enter)
    Commit,
    Clear,
}

/// Apply an action and return the next state.
pub fn reduce(state: &TimePickerState, action: TimePickerAction) -> TimePickerState {
    let mut next = state.clone();
    match action {
        TimePickerAction::Open => next.open = true,
        TimePickerAction::Close => next.open = false,
        TimePickerAction::Edit(text) => {
            next.input = text;
            next.error = None;
            next.open = true;
        }
        TimePickerAction::Choose(time) => {
            next.input = time.to_string();
            next.value = Some(time);
            next.error = None;
            next.open = false;
        }
        TimePickerAction::Commit => {
            next.open = false;
            if next.input.trim().is_empty() {
                next.value = None;
                next.error = None;
                next.input.clear();
                return next;
            }
            match parse_manual_time(&next.input) {
                Ok(time) => {
                    next.input = time.to_string();
                    next.value = Some(time);
                    next.error = None;
                }
                Err(_) => next.error = Some(INVALID_TIME_MESSAGE.to_string()),
            }
        }
        TimePickerAction::Clear => next = TimePickerState::default(),
    }
    next
}

/// Slots whose canonical text starts with what the user typed.
pub fn suggestions(state: &TimePickerState, slots: &[TimeOfDay]) -> Vec<TimeOfDay> {
    let typed = clean_time_text(&state.input);
    if typed.is_empty() {
        return slots.to_vec();
    }
    slots
        .iter()
        .filter(|slot| slot.to_string().starts_with(&typed))
        .copied()
        .collect()
}
