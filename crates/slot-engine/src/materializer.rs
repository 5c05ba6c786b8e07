//! Window materialization: local weekly rules to absolute windows for one day.
//!
//! The anchor date is always a date in the schedule's timezone. Wall-clock
//! boundaries are converted with `chrono-tz`, so a 09:00–17:00 rule is eight
//! real hours on ordinary days and follows the owner's clock across DST changes.

use chrono::NaiveDate;
use chrono_tz::Tz;
use tracing::warn;

use crate::dst::{self, DstPolicy};
use crate::interval::Interval;
use crate::rules::AvailabilityRule;

/// Materialize `rules` on `local_date` in `timezone` with the default DST policy.
pub fn materialize(local_date: NaiveDate, timezone: &Tz, rules: &[AvailabilityRule]) -> Vec<Interval> {
    materialize_with_policy(local_date, timezone, rules, DstPolicy::default())
}

/// Materialize `rules` on `local_date` in `timezone`.
///
/// Windows whose materialized end is not after their start are dropped, as
/// are windows with a boundary in a DST gap under [`DstPolicy::Skip`].
pub fn materialize_with_policy(
    local_date: NaiveDate,
    timezone: &Tz,
    rules: &[AvailabilityRule],
    policy: DstPolicy,
) -> Vec<Interval> {
    rules
        .iter()
        .filter_map(|rule| {
            let start = dst::resolve_local(timezone, rule.start.on(local_date)?, policy)?;
            let end = dst::resolve_local(timezone, rule.end.on(local_date)?, policy)?;
            if end <= start {
                warn!(
                    date = %local_date,
                    weekday = %rule.weekday,
                    start = %rule.start,
                    end = %rule.end,
                    timezone = %timezone,
                    "dropping availability window that does not end after it starts"
                );
                return None;
            }
            Some(Interval { start, end })
        })
        .collect()
}
