//! Temporal primitives.
//!
//! Pure helpers for reading durations, clock times, date keywords and time
//! ranges out of free text, plus the small timestamp utilities the rest of
//! the crate builds on. All timestamps are local wall-clock
//! [`NaiveDateTime`]s; minutes-of-day are plain `i64`s and may run past
//! midnight (1440+), in which case they roll into the following day.

use std::collections::BTreeSet;

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Minutes in one day.
pub const MINUTES_PER_DAY: i64 = 24 * 60;

/// Longest duration or shift read from text: one week.
pub const MAX_DURATION_MINUTES: i64 = 7 * MINUTES_PER_DAY;

static HOURS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([0-9]+(?:\.[0-9]+)?)\s*(h|hr|hrs|hour|hours)").expect("valid hours regex")
});
static MINUTES_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([0-9]+)\s*(m|min|mins|minute|minutes)").expect("valid minutes regex")
});
static PLAIN_MINUTES_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9]+)(?:m|min)?$").expect("valid plain minutes regex"));
static CLOCK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9]{1,2})(?::([0-9]{2}))?\s*(am|pm)?$").expect("valid clock regex")
});
static ISO_DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(20[0-9]{2})-([0-9]{2})-([0-9]{2})").expect("valid date regex"));
static FROM_TO_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"from\s+([0-9: ]+(?:am|pm)?)\s+to\s+([0-9: ]+(?:am|pm)?)")
        .expect("valid range regex")
});
static AT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"at\s+([0-9: ]+(?:am|pm)?)").expect("valid at regex"));
static FOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"for\s+([0-9 .a-z]+)").expect("valid for regex"));
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// Weekday index (0=Sun) with its short and long spelling.
const WEEKDAY_NAMES: [(u8, &str, &str); 7] = [
    (0, "sun", "sunday"),
    (1, "mon", "monday"),
    (2, "tue", "tuesday"),
    (3, "wed", "wednesday"),
    (4, "thu", "thursday"),
    (5, "fri", "friday"),
    (6, "sat", "saturday"),
];

static WEEKDAY_RES: Lazy<Vec<(u8, Regex)>> = Lazy::new(|| {
    WEEKDAY_NAMES
        .iter()
        .map(|(dow, short, long)| {
            let re = Regex::new(&format!(r"\b(?:{long}|{short})s?\b")).expect("valid weekday regex");
            (*dow, re)
        })
        .collect()
});

/// Repetition attached to a parsed date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum RepeatRule {
    /// Every week on the given weekday indices (0=Sun ... 6=Sat).
    Weekly { days: BTreeSet<u8> },
}

impl RepeatRule {
    fn weekly(days: impl IntoIterator<Item = u8>) -> Self {
        RepeatRule::Weekly {
            days: days.into_iter().collect(),
        }
    }
}

/// Result of [`parse_date_keywords`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateInfo {
    pub date: NaiveDate,
    pub repeat: Option<RepeatRule>,
}

impl DateInfo {
    fn on(date: NaiveDate) -> Self {
        Self { date, repeat: None }
    }
}

/// Start and end of a range inside one day, in minutes since midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub start_minutes: i64,
    pub end_minutes: i64,
}

impl TimeRange {
    pub fn duration_minutes(&self) -> i64 {
        self.end_minutes - self.start_minutes
    }
}

fn normalize(text: &str) -> String {
    WHITESPACE_RE
        .replace_all(&text.to_lowercase(), " ")
        .trim()
        .to_string()
}

/// Parse a duration such as `90m`, `1.5h`, `1h 30m`, `2 hours` or a bare `45`.
///
/// Hour and minute tokens are read independently and summed. Returns `None`
/// when nothing parses or the total is not positive or exceeds
/// [`MAX_DURATION_MINUTES`].
pub fn parse_duration_to_minutes(text: &str) -> Option<i64> {
    let normalized = normalize(text);
    if normalized.is_empty() {
        return None;
    }

    let hours = HOURS_RE
        .captures(&normalized)
        .and_then(|caps| caps[1].parse::<f64>().ok())
        .map(|h| (h * 60.0).round() as i64);
    let minutes = MINUTES_RE
        .captures(&normalized)
        .and_then(|caps| caps[1].parse::<i64>().ok());

    let total = if hours.is_none() && minutes.is_none() {
        PLAIN_MINUTES_RE
            .captures(&normalized)
            .and_then(|caps| caps[1].parse::<i64>().ok())
            .unwrap_or(0)
    } else {
        hours.unwrap_or(0).saturating_add(minutes.unwrap_or(0))
    };

    (total > 0 && total <= MAX_DURATION_MINUTES).then_some(total)
}

/// Parse a clock time (`4pm`, `4:30 pm`, `16:05`) into minutes since midnight.
///
/// Without a suffix the hour is read as 24-hour. `pm` adds twelve hours only
/// to hours below 12, so `13pm` stays 13:00.
pub fn parse_time_of_day(text: &str) -> Option<i64> {
    let s = text.trim().to_lowercase();
    let caps = CLOCK_RE.captures(&s)?;

    let mut hour: i64 = caps[1].parse().ok()?;
    let minute: i64 = match caps.get(2) {
        Some(m) => m.as_str().parse().ok()?,
        None => 0,
    };
    match caps.get(3).map(|m| m.as_str()) {
        Some("pm") if hour < 12 => hour += 12,
        Some("am") if hour == 12 => hour = 0,
        _ => {}
    }

    if hour > 23 || minute > 59 {
        return None;
    }
    Some(hour * 60 + minute)
}

/// Find a date keyword in `text`, relative to `reference`.
///
/// Checked in order: `today`, `tomorrow`, `weekdays`, `weekends`, weekday
/// names (which produce a weekly repeat anchored on the reference day), and
/// an explicit `YYYY-MM-DD`.
pub fn parse_date_keywords(text: &str, reference: NaiveDateTime) -> Option<DateInfo> {
    let s = text.to_lowercase();
    let today = reference.date();

    if s.contains("today") {
        return Some(DateInfo::on(today));
    }
    if s.contains("tomorrow") {
        return Some(DateInfo::on(today + Duration::days(1)));
    }
    if s.contains("weekdays") {
        return Some(DateInfo {
            date: today,
            repeat: Some(RepeatRule::weekly([1, 2, 3, 4, 5])),
        });
    }
    if s.contains("weekends") {
        return Some(DateInfo {
            date: today,
            repeat: Some(RepeatRule::weekly([0, 6])),
        });
    }

    let days: Vec<u8> = WEEKDAY_RES
        .iter()
        .filter(|(_, re)| re.is_match(&s))
        .map(|(dow, _)| *dow)
        .collect();
    if !days.is_empty() {
        return Some(DateInfo {
            date: today,
            repeat: Some(RepeatRule::weekly(days)),
        });
    }

    let caps = ISO_DATE_RE.captures(&s)?;
    let date = NaiveDate::from_ymd_opt(
        caps[1].parse().ok()?,
        caps[2].parse().ok()?,
        caps[3].parse().ok()?,
    )?;
    Some(DateInfo::on(date))
}

/// Clock time following the first `at`, if it parses.
pub fn parse_at_fragment(text: &str) -> Option<i64> {
    let s = text.to_lowercase();
    AT_RE
        .captures(&s)
        .and_then(|caps| parse_time_of_day(&caps[1]))
}

/// Text following the first `for`, if any. The caller decides what an
/// unparseable duration means.
pub fn find_for_fragment(text: &str) -> Option<String> {
    let s = text.to_lowercase();
    FOR_RE.captures(&s).map(|caps| caps[1].to_string())
}

/// Read a `from X to Y` range, or failing that an `at X for D` pair.
pub fn parse_time_range_from_text(text: &str) -> Option<TimeRange> {
    let s = text.to_lowercase();

    if let Some(caps) = FROM_TO_RE.captures(&s) {
        let start = parse_time_of_day(&caps[1]);
        let end = parse_time_of_day(&caps[2]);
        if let (Some(start), Some(end)) = (start, end) {
            if end > start {
                return Some(TimeRange {
                    start_minutes: start,
                    end_minutes: end,
                });
            }
        }
    }

    let start = parse_at_fragment(&s)?;
    let duration = find_for_fragment(&s).and_then(|d| parse_duration_to_minutes(&d))?;
    Some(TimeRange {
        start_minutes: start,
        end_minutes: start + duration,
    })
}

/// Saturates at the ends of the representable range instead of overflowing.
pub fn add_minutes(at: NaiveDateTime, minutes: i64) -> NaiveDateTime {
    Duration::try_minutes(minutes)
        .and_then(|delta| at.checked_add_signed(delta))
        .unwrap_or(if minutes < 0 {
            NaiveDateTime::MIN
        } else {
            NaiveDateTime::MAX
        })
}

/// Midnight of the same day.
pub fn clamp_date_to_day(at: NaiveDateTime) -> NaiveDateTime {
    at.date().and_time(NaiveTime::MIN)
}

/// `date` at midnight plus `minutes`; values past 1440 land on later days.
pub fn set_time_on_date(date: NaiveDate, minutes: i64) -> NaiveDateTime {
    add_minutes(date.and_time(NaiveTime::MIN), minutes)
}

pub fn minute_of_day(at: NaiveDateTime) -> i64 {
    i64::from(at.hour()) * 60 + i64::from(at.minute())
}

/// Weekday index with Sunday as 0.
pub fn weekday_index(date: NaiveDate) -> u8 {
    date.weekday().num_days_from_sunday() as u8
}

/// Whole minutes between two timestamps, rounded to the nearest minute.
pub fn minutes_between(start: NaiveDateTime, end: NaiveDateTime) -> i64 {
    let ms = (end - start).num_milliseconds();
    (ms as f64 / 60_000.0).round() as i64
}

/// `6:05 PM` style.
pub fn format_time_hm(at: NaiveDateTime) -> String {
    let (is_pm, hour12) = at.hour12();
    format!(
        "{}:{:02} {}",
        hour12,
        at.minute(),
        if is_pm { "PM" } else { "AM" }
    )
}

/// `Monday, Oct 19` style.
pub fn format_day_label(date: NaiveDate) -> String {
    date.format("%A, %b %-d").to_string()
}

/// `1h 30m`, `2h`, `45m`.
pub fn human_duration(minutes: i64) -> String {
    let h = minutes / 60;
    let m = minutes % 60;
    match (h, m) {
        (0, m) => format!("{m}m"),
        (h, 0) => format!("{h}h"),
        (h, m) => format!("{h}h {m}m"),
    }
}
