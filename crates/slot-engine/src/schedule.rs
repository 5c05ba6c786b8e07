//! An owner's weekly schedule: timezone plus availability rules.

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SlotError};
use crate::rules::{AvailabilityRule, WeeklyRuleIndex};

/// The single schedule an owner keeps. Replaced wholesale on save and
/// read-only to the resolver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    pub owner_id: String,
    /// IANA timezone the rules' wall-clock times are expressed in.
    pub timezone: Tz,
    #[serde(default)]
    pub rules: Vec<AvailabilityRule>,
}

impl Schedule {
    /// # Errors
    /// Returns `SlotError::InvalidTimezone` if `timezone` is not a valid IANA identifier.
    pub fn new(
        owner_id: impl Into<String>,
        timezone: &str,
        rules: Vec<AvailabilityRule>,
    ) -> Result<Self> {
        let timezone: Tz = timezone
            .parse()
            .map_err(|_| SlotError::InvalidTimezone(timezone.to_string()))?;
        Ok(Self {
            owner_id: owner_id.into(),
            timezone,
            rules,
        })
    }

    /// Parse a schedule from JSON. `null` yields `None` (no configured schedule).
    pub fn from_json(json: &str) -> Result<Option<Self>> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn index(&self) -> WeeklyRuleIndex {
        WeeklyRuleIndex::new(&self.rules)
    }
}
