//! Port interfaces for the collaborators around the resolver.
//!
//! Persistence, calendar providers and booking write-back live outside this
//! crate; implementations map their own failures into [`SlotError`] variants
//! (`Repository`, `Provider`, `Sink`) so callers can tell them apart from
//! caller mistakes.
//!
//! [`SlotError`]: crate::error::SlotError

use async_trait::async_trait;

use crate::booking::ConfirmedBooking;
use crate::error::Result;
use crate::interval::{BusyInterval, Interval};
use crate::schedule::Schedule;

/// Source of owners' saved schedules.
#[async_trait]
pub trait ScheduleRepository: Send + Sync {
    /// `Ok(None)` when the owner has never saved a schedule.
    async fn get_schedule(&self, owner_id: &str) -> Result<Option<Schedule>>;
}

/// Source of busy intervals, typically a third-party calendar.
#[async_trait]
pub trait BusyIntervalProvider: Send + Sync {
    /// Busy intervals for `owner_id` that intersect `range`.
    ///
    /// Authorization or connectivity failures must be returned as errors,
    /// never as an empty list.
    async fn get_busy_intervals(&self, owner_id: &str, range: Interval) -> Result<Vec<BusyInterval>>;
}

/// Records a confirmed booking, including the busy interval it creates.
#[async_trait]
pub trait BookingSink: Send + Sync {
    async fn record_booking(&self, booking: &ConfirmedBooking) -> Result<()>;
}
