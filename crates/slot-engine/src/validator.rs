//! Slot validation. Filters candidate start instants down to the bookable ones.
//!
//! A candidate `t` is accepted iff the proposed event `[t, t + duration)`:
//! 1. lies within at least one availability window materialized for `t`'s
//!    local day in the schedule's timezone (closed bounds at both ends), and
//! 2. overlaps no busy interval (half-open; adjacency is not a conflict).
//!
//! The function is pure: identical inputs give identical output, so the
//! booking path can re-run it at commit time against fresh busy intervals.

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::dst::DstPolicy;
use crate::error::{Result, SlotError};
use crate::interval::{BusyIndex, BusyInterval, Interval};
use crate::materializer::materialize_with_policy;
use crate::schedule::Schedule;

/// The event attributes slot resolution needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventSpec {
    pub owner_id: String,
    pub duration_minutes: u32,
}

impl EventSpec {
    pub fn new(owner_id: impl Into<String>, duration_minutes: u32) -> Self {
        Self {
            owner_id: owner_id.into(),
            duration_minutes,
        }
    }

    /// # Errors
    /// Returns `SlotError::InvalidDuration` if the duration is zero.
    pub fn validate(&self) -> Result<()> {
        if self.duration_minutes == 0 {
            return Err(SlotError::InvalidDuration(self.duration_minutes));
        }
        Ok(())
    }

    pub fn duration(&self) -> Duration {
        Duration::minutes(i64::from(self.duration_minutes))
    }

    /// The interval this event occupies when it starts at `start`.
    ///
    /// # Errors
    /// Returns `SlotError::InvalidInterval` if the event would end past the
    /// last representable instant.
    pub fn occupying(&self, start: DateTime<Utc>) -> Result<Interval> {
        Interval::starting_at(start, self.duration()).ok_or_else(|| {
            SlotError::InvalidInterval(format!(
                "{} minute event starting at {} ends out of range",
                self.duration_minutes, start
            ))
        })
    }
}

/// Return the candidates at which `event` could be booked, in input order.
///
/// An absent schedule or an empty candidate list yields an empty result.
/// Duplicate candidates are kept.
///
/// # Errors
/// Returns `SlotError::InvalidDuration` if `event.duration_minutes` is zero.
pub fn resolve_valid_slots(
    candidates: &[DateTime<Utc>],
    event: &EventSpec,
    schedule: Option<&Schedule>,
    busy: &[BusyInterval],
) -> Result<Vec<DateTime<Utc>>> {
    resolve_valid_slots_with_policy(candidates, event, schedule, busy, DstPolicy::default())
}

/// [`resolve_valid_slots`] with an explicit DST policy for window boundaries.
pub fn resolve_valid_slots_with_policy(
    candidates: &[DateTime<Utc>],
    event: &EventSpec,
    schedule: Option<&Schedule>,
    busy: &[BusyInterval],
    policy: DstPolicy,
) -> Result<Vec<DateTime<Utc>>> {
    event.validate()?;

    let Some(schedule) = schedule else {
        debug!(owner = %event.owner_id, "no schedule configured; nothing is bookable");
        return Ok(Vec::new());
    };
    if candidates.is_empty() {
        return Ok(Vec::new());
    }

    let index = schedule.index();
    if index.is_empty() {
        debug!(owner = %schedule.owner_id, "schedule has no rules; nothing is bookable");
        return Ok(Vec::new());
    }
    let busy = BusyIndex::new(busy);
    let duration = event.duration();

    // Candidates are usually ordered, so consecutive ones share a local day.
    let mut day_windows: Option<(NaiveDate, Vec<Interval>)> = None;
    let mut valid = Vec::new();

    for &candidate in candidates {
        let local_date = candidate.with_timezone(&schedule.timezone).date_naive();
        if day_windows.as_ref().map(|(date, _)| *date) != Some(local_date) {
            let rules = index.for_weekday(local_date.weekday());
            let windows = materialize_with_policy(local_date, &schedule.timezone, rules, policy);
            day_windows = Some((local_date, windows));
        }
        let windows = day_windows
            .as_ref()
            .map(|(_, windows)| windows.as_slice())
            .unwrap_or_default();

        // An event that would end out of range fits no window.
        let Some(proposed) = Interval::starting_at(candidate, duration) else {
            continue;
        };
        let contained = windows.iter().any(|window| window.contains(&proposed));
        if contained && !busy.conflicts_with(&proposed) {
            valid.push(candidate);
        }
    }

    debug!(
        owner = %schedule.owner_id,
        candidates = candidates.len(),
        busy = busy.merged().len(),
        accepted = valid.len(),
        "resolved valid slots"
    );

    Ok(valid)
}
