//! Domain models for appointment rules.

mod appointment;
mod time;

pub use appointment::*;
pub use time::*;
