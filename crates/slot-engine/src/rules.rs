//! Weekly availability rules and the per-weekday index built from them.
//!
//! Rules are stored as local wall-clock windows (`"09:00"`–`"17:00"`) keyed by
//! weekday, with no date or timezone attached. The [`WeeklyRuleIndex`] groups
//! them once per resolution call so each candidate looks up its weekday in O(1).

use std::fmt;
use std::str::FromStr;

use chrono::{Duration, NaiveDate, NaiveDateTime, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SlotError};

/// The seven weekdays in display order. Resolution never depends on this order.
pub const DAYS_OF_WEEK_IN_ORDER: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

const MINUTES_PER_DAY: u16 = 24 * 60;

/// A local wall-clock time of day with minute precision.
///
/// Serialized as `"HH:MM"`. `"24:00"` is accepted so a window can run until
/// the end of the day; it materializes to the following local midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay {
    minutes: u16,
}

impl TimeOfDay {
    /// Build from an hour and minute. Hour 24 is only valid with minute 0.
    pub fn new(hour: u32, minute: u32) -> Result<Self> {
        if minute > 59 || hour > 24 || (hour == 24 && minute != 0) {
            return Err(SlotError::InvalidTimeOfDay(format!(
                "{:02}:{:02}",
                hour, minute
            )));
        }
        Ok(Self {
            minutes: (hour * 60 + minute) as u16,
        })
    }

    pub fn hour(&self) -> u32 {
        u32::from(self.minutes / 60)
    }

    pub fn minute(&self) -> u32 {
        u32::from(self.minutes % 60)
    }

    /// Minutes elapsed since local midnight (0..=1440).
    pub fn minutes_since_midnight(&self) -> u16 {
        self.minutes
    }

    pub fn is_end_of_day(&self) -> bool {
        self.minutes == MINUTES_PER_DAY
    }

    /// Anchor this time of day to a calendar date as a naive wall-clock value.
    pub fn on(&self, date: NaiveDate) -> Option<NaiveDateTime> {
        date.and_hms_opt(0, 0, 0)?
            .checked_add_signed(Duration::minutes(i64::from(self.minutes)))
    }
}

impl FromStr for TimeOfDay {
    type Err = SlotError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || SlotError::InvalidTimeOfDay(s.to_string());
        let (hour, minute) = s.trim().split_once(':').ok_or_else(invalid)?;
        if hour.is_empty() || hour.len() > 2 || minute.len() != 2 {
            return Err(invalid());
        }
        // `u32::from_str` would also take a leading `+`.
        if !hour.bytes().chain(minute.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let hour: u32 = hour.parse().map_err(|_| invalid())?;
        let minute: u32 = minute.parse().map_err(|_| invalid())?;
        TimeOfDay::new(hour, minute).map_err(|_| invalid())
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = SlotError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<TimeOfDay> for String {
    fn from(value: TimeOfDay) -> Self {
        value.to_string()
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

/// One recurring weekly availability window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RuleRecord")]
pub struct AvailabilityRule {
    pub weekday: Weekday,
    pub start: TimeOfDay,
    pub end: TimeOfDay,
}

impl AvailabilityRule {
    /// # Errors
    /// Returns `SlotError::InvalidRule` unless `start < end`.
    pub fn new(weekday: Weekday, start: TimeOfDay, end: TimeOfDay) -> Result<Self> {
        if start >= end {
            return Err(SlotError::InvalidRule(format!(
                "{} window {}-{} must start before it ends",
                weekday, start, end
            )));
        }
        Ok(Self {
            weekday,
            start,
            end,
        })
    }

    /// Parse a rule from stored `"HH:MM"` strings.
    pub fn parse(weekday: Weekday, start: &str, end: &str) -> Result<Self> {
        Self::new(weekday, start.parse()?, end.parse()?)
    }
}

#[derive(Deserialize)]
struct RuleRecord {
    weekday: Weekday,
    start: TimeOfDay,
    end: TimeOfDay,
}

impl TryFrom<RuleRecord> for AvailabilityRule {
    type Error = SlotError;

    fn try_from(record: RuleRecord) -> Result<Self> {
        AvailabilityRule::new(record.weekday, record.start, record.end)
    }
}

/// Rules grouped by weekday. Weekdays without rules map to an empty slice.
#[derive(Debug, Clone, Default)]
pub struct WeeklyRuleIndex {
    days: [Vec<AvailabilityRule>; 7],
}

impl WeeklyRuleIndex {
    pub fn new(rules: &[AvailabilityRule]) -> Self {
        let mut days: [Vec<AvailabilityRule>; 7] = Default::default();
        for rule in rules {
            days[rule.weekday.num_days_from_monday() as usize].push(rule.clone());
        }
        Self { days }
    }

    pub fn for_weekday(&self, weekday: Weekday) -> &[AvailabilityRule] {
        &self.days[weekday.num_days_from_monday() as usize]
    }

    pub fn is_empty(&self) -> bool {
        self.days.iter().all(Vec::is_empty)
    }
}
