//! Integration tests for the utterance interpreter.
//!
//! Covers each classification path through the public `interpret` entry
//! point and the JSON shape of the resulting operations.

use chrono::{NaiveDate, NaiveDateTime};
use timewise_core::time::{parse_duration_to_minutes, parse_time_of_day};
use timewise_core::{interpret, Event, Operation, PlannerState, Settings};

fn reference() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 10, 19)
        .unwrap()
        .and_hms_opt(14, 37, 0)
        .unwrap()
}

fn at(day: u32, h: u32, m: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 10, day)
        .unwrap()
        .and_hms_opt(h, m, 0)
        .unwrap()
}

fn empty() -> PlannerState {
    PlannerState::new(Settings::default(), vec![])
}

#[test]
fn test_temporal_parsing_examples() {
    assert_eq!(parse_duration_to_minutes("1h 30m"), Some(90));
    assert_eq!(parse_duration_to_minutes("90m"), Some(90));
    assert_eq!(parse_duration_to_minutes("2 hours"), Some(120));
    assert_eq!(parse_duration_to_minutes("xyz"), None);

    assert_eq!(parse_time_of_day("4pm"), Some(960));
    assert_eq!(parse_time_of_day("4:30 pm"), Some(990));
    assert_eq!(parse_time_of_day("16:05"), Some(965));
    assert_eq!(parse_time_of_day("13pm"), Some(780));
}

#[test]
fn test_add_study_block() {
    let result = interpret("Add study block at 6pm for 45m today", &empty(), reference());
    match result.operations.as_slice() {
        [Operation::AddEvent { event }] => {
            assert_eq!(event.title, "study block");
            assert_eq!(event.start, at(19, 18, 0));
            assert_eq!(event.end, at(19, 18, 45));
            assert!(!event.pinned);
        }
        other => panic!("expected one addEvent, got {other:?}"),
    }
}

#[test]
fn test_delete_gym() {
    let result = interpret("delete gym", &empty(), reference());
    assert_eq!(
        result.operations,
        vec![Operation::DeleteByTitle {
            title: "gym".into()
        }]
    );
}

#[test]
fn test_move_on_explicit_date() {
    let state = PlannerState::new(
        Settings::default(),
        vec![Event::lasting("Dentist", at(19, 9, 0), 30)],
    );
    let result = interpret("move dentist at 10am for 45m on 2026-11-02", &state, reference());
    assert_eq!(
        result.operations,
        vec![Operation::MoveEvent {
            id: state.events[0].id.clone(),
            start: at(19, 10, 0) + chrono::Duration::days(14),
            end: at(19, 10, 45) + chrono::Duration::days(14),
        }]
    );
}

#[test]
fn test_move_without_target_degrades_to_add() {
    let result = interpret("move piano at 5pm for 30m", &empty(), reference());
    match result.operations.as_slice() {
        [Operation::AddEvent { event }] => {
            assert_eq!(event.title, "piano");
            assert_eq!(event.start, at(19, 17, 0));
            assert_eq!(event.end, at(19, 17, 30));
        }
        other => panic!("expected fallback addEvent, got {other:?}"),
    }
}

#[test]
fn test_operation_json_shape() {
    let result = interpret("shift today by 1h 15m", &empty(), reference());
    let value = serde_json::to_value(&result.operations).unwrap();
    assert_eq!(
        value,
        serde_json::json!([{
            "type": "shiftDay",
            "date": "2026-10-19",
            "deltaMinutes": 75
        }])
    );

    let result = interpret("Add call at 9am for 15m tomorrow", &empty(), reference());
    let value = serde_json::to_value(&result.operations).unwrap();
    assert_eq!(value[0]["type"], "addEvent");
    assert_eq!(value[0]["event"]["title"], "call");
    assert_eq!(value[0]["event"]["start"], "2026-10-20T09:00:00");
    assert_eq!(value[0]["event"]["status"], "scheduled");
}

#[test]
fn test_every_utterance_yields_an_operation() {
    for text in ["", "hello", "move", "delete", "late by", "from 9 to 8"] {
        let result = interpret(text, &empty(), reference());
        assert!(!result.operations.is_empty(), "nothing for {text:?}");
    }
}
