//! Free-text command interpreter.
//!
//! Turns an utterance such as `"Add study block at 6pm for 45m today"` into
//! [`Operation`]s. Classification is a fixed, ordered table of rules; each
//! rule either claims the utterance or passes it on. Adding a new event is
//! the final rule and cannot decline, so every utterance produces at least
//! one operation.

mod title;

pub use title::{extract_title, find_event_by_title_fuzzy, match_score};

use chrono::{Duration, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use tracing::debug;

use crate::event::Event;
use crate::operation::Operation;
use crate::state::PlannerState;
use crate::time::{
    find_for_fragment, minute_of_day, parse_at_fragment, parse_date_keywords,
    parse_duration_to_minutes, parse_time_range_from_text, set_time_on_date, weekday_index,
    DateInfo, RepeatRule,
};

/// Start used when an added event names no time (18:00).
pub const DEFAULT_START_MINUTES: i64 = 18 * 60;
/// Length used when an added event names no usable duration.
pub const DEFAULT_DURATION_MINUTES: i64 = 60;
/// How many weeks a repeating utterance is expanded over.
pub const REPEAT_WEEKS: i64 = 4;

static SHIFT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(shift|late)\b").expect("valid shift regex"));
static BY_WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bby\b").expect("valid by regex"));
static BY_TAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"by\s+([0-9 .a-z]+)").expect("valid by-tail regex"));
static DELETE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(delete|cancel|remove)\b").expect("valid delete regex"));
static MOVE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(move|reschedule)\b").expect("valid move regex"));

/// Result of interpreting one utterance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Interpretation {
    pub operations: Vec<Operation>,
}

/// Trimmed utterance plus its lowercase form, shared by all rules.
struct Utterance<'a> {
    text: &'a str,
    lower: String,
}

impl<'a> Utterance<'a> {
    fn new(raw: &'a str) -> Self {
        let text = raw.trim();
        Self {
            text,
            lower: text.to_lowercase(),
        }
    }
}

/// Everything a rule may read.
struct Context<'a> {
    events: &'a [Event],
    reference: NaiveDateTime,
}

type Rule = fn(&Utterance<'_>, &Context<'_>) -> Option<Vec<Operation>>;

/// Tried top to bottom; the first rule returning `Some` wins.
const RULES: [(&str, Rule); 3] = [
    ("shift-day", shift_day_rule),
    ("delete", delete_rule),
    ("move", move_rule),
];

/// Interpret `text` against the current state.
///
/// `reference` is the local wall-clock "now" that relative words like
/// `today` resolve against.
pub fn interpret(text: &str, state: &PlannerState, reference: NaiveDateTime) -> Interpretation {
    let utterance = Utterance::new(text);
    let ctx = Context {
        events: &state.events,
        reference,
    };

    for (name, rule) in RULES {
        if let Some(operations) = rule(&utterance, &ctx) {
            debug!(rule = name, count = operations.len(), "utterance classified");
            return Interpretation { operations };
        }
    }

    let operations = add_rule(&utterance, &ctx);
    debug!(rule = "add", count = operations.len(), "utterance classified");
    Interpretation { operations }
}

/// `"shift today by 30m"`, `"running late by 15 minutes"`.
fn shift_day_rule(utterance: &Utterance<'_>, ctx: &Context<'_>) -> Option<Vec<Operation>> {
    let lower = &utterance.lower;
    if !SHIFT_RE.is_match(lower) || !BY_WORD_RE.is_match(lower) {
        return None;
    }
    let tail = BY_TAIL_RE.captures(lower)?;
    let Some(minutes) = parse_duration_to_minutes(&tail[1]) else {
        debug!("shift intent without a duration, falling through");
        return None;
    };

    let today = ctx.reference.date();
    let targets_today = lower.contains("today") || !lower.contains("tomorrow");
    let date = if targets_today {
        today
    } else {
        today + Duration::days(1)
    };
    Some(vec![Operation::ShiftDay {
        date,
        delta_minutes: minutes,
    }])
}

/// `"delete gym"`, `"cancel standup"`. Matching happens when applied.
fn delete_rule(utterance: &Utterance<'_>, _ctx: &Context<'_>) -> Option<Vec<Operation>> {
    if !DELETE_RE.is_match(&utterance.lower) {
        return None;
    }
    Some(vec![Operation::DeleteByTitle {
        title: extract_title(utterance.text),
    }])
}

/// `"move gym to 7pm for 1h"`. Needs a matching event and a full start and
/// end; anything less is handed to the add rule.
fn move_rule(utterance: &Utterance<'_>, ctx: &Context<'_>) -> Option<Vec<Operation>> {
    if !MOVE_RE.is_match(&utterance.lower) {
        return None;
    }
    let title = extract_title(utterance.text);
    let day = target_day(utterance, ctx).date;

    let (start_minutes, end_minutes) = match parse_time_range_from_text(utterance.text) {
        Some(range) => (Some(range.start_minutes), Some(range.end_minutes)),
        None => {
            let start = parse_at_fragment(utterance.text);
            let end = start.and_then(|start| {
                find_for_fragment(utterance.text)
                    .and_then(|d| parse_duration_to_minutes(&d))
                    .map(|d| start + d)
            });
            (start, end)
        }
    };

    let target = find_event_by_title_fuzzy(ctx.events, &title);
    match (target, start_minutes, end_minutes) {
        (Some(event), Some(start), Some(end)) => Some(vec![Operation::MoveEvent {
            id: event.id.clone(),
            start: set_time_on_date(day, start),
            end: set_time_on_date(day, end),
        }]),
        _ => {
            debug!(
                %title,
                matched = target.is_some(),
                "move incomplete, falling back to add"
            );
            None
        }
    }
}

/// Default rule: create one event, or a month of weekly occurrences.
fn add_rule(utterance: &Utterance<'_>, ctx: &Context<'_>) -> Vec<Operation> {
    let title = extract_title(utterance.text);
    let date_info = target_day(utterance, ctx);
    let day = date_info.date;

    let (start_minutes, duration) = match parse_time_range_from_text(utterance.text) {
        Some(range) => (range.start_minutes, range.duration_minutes()),
        None => {
            let start = parse_at_fragment(utterance.text).unwrap_or(DEFAULT_START_MINUTES);
            let duration = find_for_fragment(utterance.text)
                .and_then(|d| parse_duration_to_minutes(&d))
                .unwrap_or(DEFAULT_DURATION_MINUTES);
            (start, duration)
        }
    };

    let base = Event::lasting(title, set_time_on_date(day, start_minutes), duration);

    match date_info.repeat {
        Some(RepeatRule::Weekly { days }) => expand_weekly(&base, day, &days)
            .into_iter()
            .map(|event| Operation::AddEvent { event })
            .collect(),
        None => vec![Operation::AddEvent { event: base }],
    }
}

fn target_day(utterance: &Utterance<'_>, ctx: &Context<'_>) -> DateInfo {
    parse_date_keywords(utterance.text, ctx.reference).unwrap_or(DateInfo {
        date: ctx.reference.date(),
        repeat: None,
    })
}

/// One copy of `base` per weekday per week, each at the base time of day.
fn expand_weekly(
    base: &Event,
    anchor: NaiveDate,
    days: &std::collections::BTreeSet<u8>,
) -> Vec<Event> {
    let anchor_dow = i64::from(weekday_index(anchor));
    let start_of_day = minute_of_day(base.start);

    let mut occurrences = Vec::with_capacity(days.len() * REPEAT_WEEKS as usize);
    for week in 0..REPEAT_WEEKS {
        for &dow in days {
            let offset_days = (i64::from(dow) - anchor_dow + 7).rem_euclid(7) + week * 7;
            let date = anchor + Duration::days(offset_days);
            occurrences.push(base.occurrence_at(set_time_on_date(date, start_of_day)));
        }
    }
    occurrences
}
