//! Error types for slot-engine operations.

use chrono::{DateTime, NaiveDateTime, Utc};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SlotError {
    #[error("Invalid duration: {0} minutes (must be positive)")]
    InvalidDuration(u32),

    #[error("Invalid availability rule: {0}")]
    InvalidRule(String),

    #[error("Invalid time of day: {0}")]
    InvalidTimeOfDay(String),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Invalid interval: {0}")]
    InvalidInterval(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid booking request: {0}")]
    InvalidBooking(String),

    #[error("Local time {local} does not exist in {timezone}")]
    NonexistentLocalTime {
        local: NaiveDateTime,
        timezone: String,
    },

    #[error("Event type {0} is not active")]
    InactiveEvent(String),

    #[error("Booking request does not match event type {0}")]
    EventMismatch(String),

    #[error("Slot at {0} is no longer available")]
    SlotUnavailable(DateTime<Utc>),

    /// The schedule store failed; the owner's availability is unknown.
    #[error("Schedule lookup failed: {0}")]
    Repository(String),

    /// The busy-interval source failed. Never treated as "no conflicts".
    #[error("Busy interval lookup failed: {0}")]
    Provider(String),

    #[error("Busy interval lookup timed out after {0}s")]
    ProviderTimeout(u64),

    #[error("Recording booking failed: {0}")]
    Sink(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SlotError {
    /// True for failures of an external collaborator rather than of the caller's
    /// input. These are the "could not verify availability, try again" cases.
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            SlotError::Repository(_)
                | SlotError::Provider(_)
                | SlotError::ProviderTimeout(_)
                | SlotError::Sink(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, SlotError>;
