//! Absolute time intervals, busy intervals, and the merged busy index.
//!
//! Two boundary conventions apply:
//! - availability containment is closed at both ends, so an event may end
//!   exactly when a window ends;
//! - busy overlap is half-open, so adjacent intervals (one ends exactly when
//!   the other starts) are NOT conflicts.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::dst::{self, DstPolicy};
use crate::error::{Result, SlotError};

/// An absolute time interval between two instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Interval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Interval {
    /// # Errors
    /// Returns `SlotError::InvalidInterval` unless `start < end`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self> {
        if start >= end {
            return Err(SlotError::InvalidInterval(format!(
                "{} is not before {}",
                start, end
            )));
        }
        Ok(Self { start, end })
    }

    /// The interval `[start, start + duration)` occupied by a proposed event,
    /// or `None` if the end is past the last representable instant.
    pub fn starting_at(start: DateTime<Utc>, duration: Duration) -> Option<Self> {
        let end = start.checked_add_signed(duration)?;
        Some(Self { start, end })
    }

    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    /// Two intervals overlap iff `a.start < b.end && b.start < a.end`.
    /// This excludes the adjacent case where `a.end == b.start`.
    pub fn overlaps(&self, other: &Interval) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Closed-interval membership: both boundaries count as inside.
    pub fn contains_instant(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant <= self.end
    }

    /// True when both of `other`'s boundaries lie within `self`, inclusive.
    pub fn contains(&self, other: &Interval) -> bool {
        self.contains_instant(other.start) && self.contains_instant(other.end)
    }
}

/// A time range already occupied on the owner's calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BusyRecord")]
pub struct BusyInterval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl BusyInterval {
    /// # Errors
    /// Returns `SlotError::InvalidInterval` unless `start < end`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self> {
        Interval::new(start, end)?;
        Ok(Self { start, end })
    }

    /// Busy interval for an all-day calendar entry spanning `start_date` up to
    /// but excluding `end_date`, midnight to midnight in `tz`.
    ///
    /// # Errors
    /// Returns `SlotError::InvalidInterval` if `end_date` is not after `start_date`.
    pub fn all_day(start_date: NaiveDate, end_date: NaiveDate, tz: &Tz) -> Result<Self> {
        let midnight = |date: NaiveDate| {
            date.and_hms_opt(0, 0, 0)
                .and_then(|local| dst::resolve_local(tz, local, DstPolicy::ShiftForward))
                .ok_or_else(|| SlotError::InvalidInterval(format!("no midnight on {}", date)))
        };
        Self::new(midnight(start_date)?, midnight(end_date)?)
    }

    pub fn interval(&self) -> Interval {
        Interval {
            start: self.start,
            end: self.end,
        }
    }
}

#[derive(Deserialize)]
struct BusyRecord {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TryFrom<BusyRecord> for BusyInterval {
    type Error = SlotError;

    fn try_from(record: BusyRecord) -> Result<Self> {
        BusyInterval::new(record.start, record.end)
    }
}

/// Parse a JSON array of busy intervals.
pub fn busy_from_json(json: &str) -> Result<Vec<BusyInterval>> {
    Ok(serde_json::from_str(json)?)
}

/// Merge overlapping or adjacent intervals.
///
/// Returns a sorted, non-overlapping list. Merging adjacent intervals does not
/// change half-open overlap answers.
pub fn merge_intervals(intervals: impl IntoIterator<Item = Interval>) -> Vec<Interval> {
    let mut intervals: Vec<Interval> = intervals.into_iter().collect();
    if intervals.is_empty() {
        return Vec::new();
    }

    // Sort by start time (then by end time for stability).
    intervals.sort_by_key(|i| (i.start, i.end));

    let mut merged: Vec<Interval> = Vec::with_capacity(intervals.len());
    for interval in intervals {
        if let Some(last) = merged.last_mut() {
            if interval.start <= last.end {
                last.end = last.end.max(interval.end);
                continue;
            }
        }
        merged.push(interval);
    }

    merged
}

/// Busy intervals merged once per resolution call for logarithmic conflict checks.
#[derive(Debug, Clone, Default)]
pub struct BusyIndex {
    merged: Vec<Interval>,
}

impl BusyIndex {
    pub fn new(busy: &[BusyInterval]) -> Self {
        let valid = busy.iter().filter_map(|b| {
            if b.start < b.end {
                Some(b.interval())
            } else {
                warn!(start = %b.start, end = %b.end, "ignoring empty busy interval");
                None
            }
        });
        Self {
            merged: merge_intervals(valid),
        }
    }

    /// True when `proposed` overlaps any busy interval (half-open semantics).
    pub fn conflicts_with(&self, proposed: &Interval) -> bool {
        // Merged ends are strictly increasing, so this finds the only candidate.
        let idx = self.merged.partition_point(|b| b.end <= proposed.start);
        self.merged.get(idx).is_some_and(|b| b.overlaps(proposed))
    }

    pub fn merged(&self) -> &[Interval] {
        &self.merged
    }
}
