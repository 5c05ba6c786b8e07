//! # slot-engine
//!
//! Timezone-correct resolution of bookable meeting slots.
//!
//! Given an owner's weekly availability rules, busy intervals from their
//! calendar, and a list of candidate start times, the engine returns the
//! candidates at which an event of a given duration can actually be booked.
//! Weekly rules are wall-clock windows in the owner's timezone and are
//! materialized per local day with `chrono-tz`, so availability follows the
//! owner's own calendar days and DST transitions.
//!
//! ## Modules
//!
//! - [`rules`] — time-of-day values, weekly rules, the per-weekday index
//! - [`schedule`] — an owner's timezone and rules
//! - [`materializer`] — weekly rules → absolute windows for one local day
//! - [`interval`] — interval math, busy intervals, merged busy index
//! - [`validator`] — the pure slot filter ([`resolve_valid_slots`])
//! - [`dst`] — DST gap policies
//! - [`candidates`] — fixed-step candidate generation
//! - [`ports`] — schedule, calendar and booking collaborator traits
//! - [`booking`] — fetch-then-validate service with commit-time re-validation
//! - [`config`] — resolver configuration
//! - [`error`] — Error types

pub mod booking;
pub mod candidates;
pub mod config;
pub mod dst;
pub mod error;
pub mod interval;
pub mod materializer;
pub mod ports;
pub mod rules;
pub mod schedule;
pub mod validator;

pub use booking::{BookingRequest, BookingService, ConfirmedBooking, EventType};
pub use candidates::CandidateSteps;
pub use config::ResolverConfig;
pub use dst::DstPolicy;
pub use error::SlotError;
pub use interval::{BusyInterval, Interval};
pub use materializer::materialize;
pub use rules::{AvailabilityRule, TimeOfDay, WeeklyRuleIndex, DAYS_OF_WEEK_IN_ORDER};
pub use schedule::Schedule;
pub use validator::{resolve_valid_slots, EventSpec};
