//! Resolver configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::dst::DstPolicy;
use crate::error::{Result, SlotError};

/// Tunables for candidate generation and busy-interval fetching.
///
/// Missing JSON fields fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Spacing between generated candidate start times.
    pub candidate_step_minutes: u32,
    /// How far ahead of "now" candidates are generated.
    pub horizon_months: u32,
    /// Timeout applied to each busy-interval fetch.
    pub fetch_timeout_secs: u64,
    pub dst_policy: DstPolicy,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            candidate_step_minutes: 15,
            horizon_months: 12,
            fetch_timeout_secs: 10,
            dst_policy: DstPolicy::ShiftForward,
        }
    }
}

impl ResolverConfig {
    /// Parse and validate a configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: ResolverConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// # Errors
    /// Returns `SlotError::InvalidConfig` if the step, horizon, or timeout is zero.
    pub fn validate(&self) -> Result<()> {
        if self.candidate_step_minutes == 0 {
            return Err(SlotError::InvalidConfig(
                "candidate_step_minutes must be positive".to_string(),
            ));
        }
        if self.horizon_months == 0 {
            return Err(SlotError::InvalidConfig(
                "horizon_months must be positive".to_string(),
            ));
        }
        if self.fetch_timeout_secs == 0 {
            return Err(SlotError::InvalidConfig(
                "fetch_timeout_secs must be positive".to_string(),
            ));
        }
        Ok(())
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}
