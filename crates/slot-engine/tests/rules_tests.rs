//! Tests for time-of-day parsing, rule validation, schedules, and the weekly index.

use chrono::Weekday;
use slot_engine::{
    AvailabilityRule, Schedule, SlotError, TimeOfDay, WeeklyRuleIndex, DAYS_OF_WEEK_IN_ORDER,
};

// ── TimeOfDay ───────────────────────────────────────────────────────────────

#[test]
fn parses_stored_hh_mm() {
    let t: TimeOfDay = "09:30".parse().unwrap();
    assert_eq!((t.hour(), t.minute()), (9, 30));
    assert_eq!(t.minutes_since_midnight(), 570);
    assert_eq!(t.to_string(), "09:30");
}

#[test]
fn single_digit_hour_is_accepted() {
    let t: TimeOfDay = "9:05".parse().unwrap();
    assert_eq!(t.to_string(), "09:05");
}

#[test]
fn end_of_day_is_accepted_only_as_24_00() {
    let t: TimeOfDay = "24:00".parse().unwrap();
    assert!(t.is_end_of_day());
    assert!("24:30".parse::<TimeOfDay>().is_err());
}

#[test]
fn malformed_times_are_rejected() {
    for bad in [
        "", "9", "09:60", "25:00", "ab:cd", "09:5", "-1:00", "09:00:00", "+9:00", "09:+5",
    ] {
        assert!(
            matches!(bad.parse::<TimeOfDay>(), Err(SlotError::InvalidTimeOfDay(_))),
            "{:?} should be rejected",
            bad
        );
    }
}

#[test]
fn times_order_chronologically() {
    let early: TimeOfDay = "08:59".parse().unwrap();
    let late: TimeOfDay = "09:00".parse().unwrap();
    assert!(early < late);
}

// ── AvailabilityRule ────────────────────────────────────────────────────────

#[test]
fn rule_requires_start_before_end() {
    assert!(AvailabilityRule::parse(Weekday::Mon, "09:00", "17:00").is_ok());
    assert!(matches!(
        AvailabilityRule::parse(Weekday::Mon, "17:00", "09:00"),
        Err(SlotError::InvalidRule(_))
    ));
    assert!(matches!(
        AvailabilityRule::parse(Weekday::Mon, "09:00", "09:00"),
        Err(SlotError::InvalidRule(_))
    ));
}

#[test]
fn rule_deserializes_from_stored_form() {
    let json = r#"{"weekday":"monday","start":"09:00","end":"17:00"}"#;
    let rule: AvailabilityRule = serde_json::from_str(json).unwrap();
    assert_eq!(rule, AvailabilityRule::parse(Weekday::Mon, "09:00", "17:00").unwrap());
}

#[test]
fn inverted_rule_fails_to_deserialize() {
    let json = r#"{"weekday":"monday","start":"17:00","end":"09:00"}"#;
    assert!(serde_json::from_str::<AvailabilityRule>(json).is_err());
}

// ── Schedule ────────────────────────────────────────────────────────────────

#[test]
fn schedule_rejects_unknown_timezone() {
    let result = Schedule::new("owner-1", "Mars/Olympus_Mons", vec![]);
    assert!(matches!(result, Err(SlotError::InvalidTimezone(_))));
}

#[test]
fn schedule_parses_from_json() {
    let json = r#"{
        "owner_id": "owner-1",
        "timezone": "Asia/Tokyo",
        "rules": [
            {"weekday": "Mon", "start": "09:00", "end": "12:00"},
            {"weekday": "Mon", "start": "13:00", "end": "17:00"}
        ]
    }"#;
    let schedule = Schedule::from_json(json).unwrap().expect("schedule present");
    assert_eq!(schedule.timezone, chrono_tz::Asia::Tokyo);
    assert_eq!(schedule.rules.len(), 2);
}

#[test]
fn null_schedule_json_is_absent() {
    assert!(Schedule::from_json("null").unwrap().is_none());
}

// ── WeeklyRuleIndex ─────────────────────────────────────────────────────────

#[test]
fn index_groups_rules_by_weekday() {
    let rules = vec![
        AvailabilityRule::parse(Weekday::Mon, "09:00", "12:00").unwrap(),
        AvailabilityRule::parse(Weekday::Wed, "10:00", "11:00").unwrap(),
        AvailabilityRule::parse(Weekday::Mon, "13:00", "17:00").unwrap(),
    ];
    let index = WeeklyRuleIndex::new(&rules);

    let monday = index.for_weekday(Weekday::Mon);
    assert_eq!(monday.len(), 2);
    assert_eq!(monday[0].start.to_string(), "09:00");
    assert_eq!(monday[1].start.to_string(), "13:00");
    assert_eq!(index.for_weekday(Weekday::Wed).len(), 1);
}

#[test]
fn absent_weekdays_map_to_empty() {
    let index = WeeklyRuleIndex::new(&[]);
    assert!(index.is_empty());
    for weekday in DAYS_OF_WEEK_IN_ORDER {
        assert!(index.for_weekday(weekday).is_empty());
    }
}

#[test]
fn weekday_constant_runs_monday_to_sunday() {
    assert_eq!(DAYS_OF_WEEK_IN_ORDER.len(), 7);
    assert_eq!(DAYS_OF_WEEK_IN_ORDER[0], Weekday::Mon);
    assert_eq!(DAYS_OF_WEEK_IN_ORDER[6], Weekday::Sun);
    for pair in DAYS_OF_WEEK_IN_ORDER.windows(2) {
        assert_eq!(pair[0].succ(), pair[1]);
    }
}
