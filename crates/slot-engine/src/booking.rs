//! Booking service: the I/O shell around the pure resolver.
//!
//! Each call performs one explicit fetch step (schedule, then busy intervals
//! under a timeout) and then runs [`resolve_valid_slots_with_policy`] on plain
//! values. Confirmation never trusts an earlier listing: it re-fetches busy
//! intervals and re-validates the chosen instant before handing the booking to
//! the [`BookingSink`]. There is no slot locking; this re-check is the only
//! guard against two guests booking the same time.

use std::sync::Arc;

use chrono::{DateTime, NaiveDateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::candidates::CandidateSteps;
use crate::config::ResolverConfig;
use crate::dst::{self, DstPolicy};
use crate::error::{Result, SlotError};
use crate::interval::{BusyInterval, Interval};
use crate::ports::{BookingSink, BusyIntervalProvider, ScheduleRepository};
use crate::validator::{resolve_valid_slots_with_policy, EventSpec};

/// A bookable event type offered by an owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventType {
    pub id: String,
    pub owner_id: String,
    pub name: String,
    pub duration_minutes: u32,
    /// Inactive event types are hidden and cannot be booked.
    pub is_active: bool,
}

impl EventType {
    pub fn event_spec(&self) -> EventSpec {
        EventSpec::new(self.owner_id.clone(), self.duration_minutes)
    }
}

/// A guest's request to book an event at a wall-clock time in their timezone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingRequest {
    pub owner_id: String,
    pub event_id: String,
    /// Start time as the guest picked it, without an offset.
    pub start: NaiveDateTime,
    /// The guest's timezone, used to interpret `start`.
    pub timezone: Tz,
    pub guest_name: String,
    pub guest_email: String,
    #[serde(default)]
    pub guest_notes: Option<String>,
}

impl BookingRequest {
    /// Requires a non-blank name and an email shaped like `local@domain.tld`.
    ///
    /// The email check is a shape check only. It does not apply RFC 5322
    /// grammar, so quoted local parts are accepted loosely and malformed
    /// domains such as `a@.com` pass.
    fn validate_guest(&self) -> Result<()> {
        if self.guest_name.trim().is_empty() {
            return Err(SlotError::InvalidBooking("guest name is required".to_string()));
        }
        let valid_email = self
            .guest_email
            .split_once('@')
            .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'));
        if !valid_email {
            return Err(SlotError::InvalidBooking(format!(
                "invalid guest email: {}",
                self.guest_email
            )));
        }
        Ok(())
    }

    /// The absolute start instant. Times skipped by a DST gap are rejected.
    pub fn start_instant(&self) -> Result<DateTime<Utc>> {
        dst::resolve_local(&self.timezone, self.start, DstPolicy::Skip).ok_or_else(|| {
            SlotError::NonexistentLocalTime {
                local: self.start,
                timezone: self.timezone.name().to_string(),
            }
        })
    }
}

/// A booking that passed re-validation and was handed to the sink.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfirmedBooking {
    pub owner_id: String,
    pub event_id: String,
    pub event_name: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub guest_name: String,
    pub guest_email: String,
    pub guest_notes: Option<String>,
}

impl ConfirmedBooking {
    /// The busy interval this booking occupies in future resolutions.
    pub fn busy_interval(&self) -> BusyInterval {
        BusyInterval {
            start: self.start,
            end: self.end,
        }
    }
}

/// Lists bookable slots and confirms bookings against live collaborators.
pub struct BookingService {
    schedules: Arc<dyn ScheduleRepository>,
    calendar: Arc<dyn BusyIntervalProvider>,
    sink: Arc<dyn BookingSink>,
    config: ResolverConfig,
}

impl BookingService {
    pub fn new(
        schedules: Arc<dyn ScheduleRepository>,
        calendar: Arc<dyn BusyIntervalProvider>,
        sink: Arc<dyn BookingSink>,
    ) -> Self {
        Self {
            schedules,
            calendar,
            sink,
            config: ResolverConfig::default(),
        }
    }

    pub fn with_config(mut self, config: ResolverConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// The subset of `candidates` at which `event` can be booked right now.
    ///
    /// # Errors
    /// `InactiveEvent` for inactive event types, `InvalidDuration` for a zero
    /// duration, `InvalidInterval` when the latest candidate's event would end
    /// out of range, and any repository or provider failure (including timeouts)
    /// unchanged.
    pub async fn available_slots(
        &self,
        event: &EventType,
        candidates: &[DateTime<Utc>],
    ) -> Result<Vec<DateTime<Utc>>> {
        if !event.is_active {
            return Err(SlotError::InactiveEvent(event.id.clone()));
        }
        let spec = event.event_spec();
        spec.validate()?;

        let (Some(first), Some(last)) = (candidates.iter().min(), candidates.iter().max()) else {
            return Ok(Vec::new());
        };

        let Some(schedule) = self.schedules.get_schedule(&event.owner_id).await? else {
            debug!(owner = %event.owner_id, "owner has no schedule");
            return Ok(Vec::new());
        };

        // Busy intervals must cover the end of the last proposed event too.
        let range = Interval::new(*first, spec.occupying(*last)?.end)?;
        let busy = self.fetch_busy(&event.owner_id, range).await?;

        resolve_valid_slots_with_policy(
            candidates,
            &spec,
            Some(&schedule),
            &busy,
            self.config.dst_policy,
        )
    }

    /// Bookable slots from `now` through the configured horizon.
    pub async fn upcoming_slots(
        &self,
        event: &EventType,
        now: DateTime<Utc>,
    ) -> Result<Vec<DateTime<Utc>>> {
        let candidates: Vec<DateTime<Utc>> = CandidateSteps::horizon(now, &self.config)?.collect();
        self.available_slots(event, &candidates).await
    }

    /// Re-validate the requested slot against fresh data and record the booking.
    ///
    /// # Errors
    /// Returns `SlotError::SlotUnavailable` if the slot is no longer free.
    pub async fn confirm(&self, event: &EventType, request: &BookingRequest) -> Result<ConfirmedBooking> {
        if request.owner_id != event.owner_id || request.event_id != event.id {
            return Err(SlotError::EventMismatch(event.id.clone()));
        }
        request.validate_guest()?;

        let start = request.start_instant()?;
        let valid = self.available_slots(event, &[start]).await?;
        if valid.is_empty() {
            return Err(SlotError::SlotUnavailable(start));
        }

        let slot = event.event_spec().occupying(start)?;
        let booking = ConfirmedBooking {
            owner_id: event.owner_id.clone(),
            event_id: event.id.clone(),
            event_name: event.name.clone(),
            start: slot.start,
            end: slot.end,
            guest_name: request.guest_name.trim().to_string(),
            guest_email: request.guest_email.clone(),
            guest_notes: request.guest_notes.clone(),
        };
        self.sink.record_booking(&booking).await?;

        info!(
            owner = %booking.owner_id,
            event = %booking.event_id,
            start = %booking.start,
            "booking confirmed"
        );
        Ok(booking)
    }

    async fn fetch_busy(&self, owner_id: &str, range: Interval) -> Result<Vec<BusyInterval>> {
        debug!(owner = %owner_id, start = %range.start, end = %range.end, "fetching busy intervals");
        match tokio::time::timeout(
            self.config.fetch_timeout(),
            self.calendar.get_busy_intervals(owner_id, range),
        )
        .await
        {
            Ok(result) => result,
            Err(_) => Err(SlotError::ProviderTimeout(self.config.fetch_timeout_secs)),
        }
    }
}
