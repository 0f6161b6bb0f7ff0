//! Rule configuration.
//!
//! Every field has a default, so an empty JSON object is a valid config.

use serde::{Deserialize, Serialize};

use crate::models::MINUTES_PER_DAY;
use crate::rules::{
    EligibilityPolicy, RulesError, RulesResult, DATE_PLACEHOLDER, DEFAULT_SLOT_INTERVAL_MINUTES,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Shown in place of a missing date
    pub date_placeholder: String,
    /// Spacing of time dropdown slots
    pub slot_interval_minutes: u32,
    #[serde(default)]
    pub eligibility: EligibilityPolicy,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            date_placeholder: DATE_PLACEHOLDER.to_string(),
            slot_interval_minutes: DEFAULT_SLOT_INTERVAL_MINUTES,
            eligibility: EligibilityPolicy::default(),
        }
    }
}

impl RulesConfig {
    /// Parse and validate a JSON config.
    pub fn from_json(json: &str) -> RulesResult<Self> {
        let config: RulesConfig =
            serde_json::from_str(json).map_err(|e| RulesError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check field ranges.
    pub fn validate(&self) -> RulesResult<()> {
        if self.slot_interval_minutes == 0 || self.slot_interval_minutes > MINUTES_PER_DAY {
            return Err(RulesError::InvalidInterval(self.slot_interval_minutes));
        }
        Ok(())
    }
}
