//! Candidate generation: fixed-step start times within a booking horizon.
//!
//! The resolver accepts any ordered sequence of instants; this is the stock
//! source used for public booking pages.

use chrono::{DateTime, Duration, Months, Utc};

use crate::config::ResolverConfig;
use crate::error::{Result, SlotError};

/// Iterator over `start, start + step, ...` up to and including `end`.
#[derive(Debug, Clone)]
pub struct CandidateSteps {
    next: Option<DateTime<Utc>>,
    end: DateTime<Utc>,
    step: Duration,
}

impl CandidateSteps {
    /// # Errors
    /// Returns `SlotError::InvalidConfig` if `step_minutes` is zero.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>, step_minutes: u32) -> Result<Self> {
        if step_minutes == 0 {
            return Err(SlotError::InvalidConfig(
                "candidate step must be positive".to_string(),
            ));
        }
        Ok(Self {
            next: Some(start),
            end,
            step: Duration::minutes(i64::from(step_minutes)),
        })
    }

    /// Candidates from `now` rounded up to the next step boundary through the
    /// end of the UTC day `config.horizon_months` later.
    pub fn horizon(now: DateTime<Utc>, config: &ResolverConfig) -> Result<Self> {
        config.validate()?;
        let out_of_range =
            || SlotError::InvalidConfig(format!("candidate horizon from {} is out of range", now));
        let start = round_up(now, config.candidate_step_minutes).ok_or_else(out_of_range)?;
        let end = start
            .checked_add_months(Months::new(config.horizon_months))
            .and_then(|later| later.date_naive().and_hms_opt(23, 59, 59))
            .map(|end_of_day| end_of_day.and_utc())
            .ok_or_else(out_of_range)?;
        Self::new(start, end, config.candidate_step_minutes)
    }
}

impl Iterator for CandidateSteps {
    type Item = DateTime<Utc>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.filter(|t| *t <= self.end)?;
        self.next = current.checked_add_signed(self.step);
        Some(current)
    }
}

/// Round `instant` up to the next multiple of `step_minutes` since the Unix
/// epoch. Instants already on a boundary are returned unchanged.
pub fn round_up(instant: DateTime<Utc>, step_minutes: u32) -> Option<DateTime<Utc>> {
    if step_minutes == 0 {
        return None;
    }
    let step_secs = i64::from(step_minutes) * 60;
    let secs = instant.timestamp();
    let rem = secs.rem_euclid(step_secs);
    if rem == 0 && instant.timestamp_subsec_nanos() == 0 {
        return Some(instant);
    }
    DateTime::from_timestamp(secs - rem + step_secs, 0)
}
