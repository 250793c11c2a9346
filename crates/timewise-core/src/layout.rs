//! Day layout: packs flexible events around pinned anchors.
//!
//! A single left-to-right greedy pass. Pinned events keep their clock time;
//! flexible events are placed back to back in their existing order, separated
//! by the buffer, and never jump ahead of a pinned event they wouldn't finish
//! before. Nothing is reordered and nothing backtracks.

use std::collections::VecDeque;

use chrono::{NaiveDate, NaiveDateTime};
use tracing::debug;

use crate::event::Event;
use crate::settings::Settings;
use crate::time::{minute_of_day, minutes_between, set_time_on_date};

/// Greedy sequencer for one day.
#[derive(Debug, Clone, Copy)]
pub struct LayoutEngine {
    buffer_minutes: i64,
}

impl LayoutEngine {
    pub fn new(buffer_minutes: i64) -> Self {
        Self {
            buffer_minutes: buffer_minutes.max(0),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.buffer())
    }

    /// Lay out one day's events.
    ///
    /// # Arguments
    /// * `events` - events starting on `day`, pinned and flexible, in their
    ///   current order
    /// * `day` - the day new flexible times are computed on
    /// * `baseline_minutes` - minute of day flexible packing starts from
    ///
    /// # Returns
    /// The events in placement order: each pinned anchor preceded by the
    /// flexible events that fit before it, then the remaining flexible ones.
    pub fn layout_day(
        &self,
        events: Vec<Event>,
        day: NaiveDate,
        baseline_minutes: i64,
    ) -> Vec<Event> {
        let (mut pinned, flex): (Vec<Event>, Vec<Event>) =
            events.into_iter().partition(|e| e.pinned);
        pinned.sort_by_key(|e| e.start);
        let mut queue: VecDeque<Event> = flex.into();

        let mut placed = Vec::with_capacity(pinned.len() + queue.len());
        let mut next_minute = baseline_minutes;

        for anchor in pinned {
            let anchor_start = minute_of_day(anchor.start);
            self.place_flex(&mut queue, &mut placed, &mut next_minute, day, Some(anchor_start));

            let anchor_end = anchor_start + minutes_between(anchor.start, anchor.end);
            next_minute = next_minute.max(anchor_end + self.buffer_minutes);
            placed.push(anchor);
        }

        self.place_flex(&mut queue, &mut placed, &mut next_minute, day, None);
        placed
    }

    /// Dequeue flexible events onto the cursor until one would run past `limit`.
    fn place_flex(
        &self,
        queue: &mut VecDeque<Event>,
        placed: &mut Vec<Event>,
        next_minute: &mut i64,
        day: NaiveDate,
        limit: Option<i64>,
    ) {
        while let Some(mut event) = queue.pop_front() {
            let duration = event.duration_minutes().max(1);
            let end_minute = *next_minute + duration;
            if limit.is_some_and(|limit| end_minute > limit) {
                debug!(id = %event.id, end_minute, ?limit, "flexible event deferred past anchor");
                queue.push_front(event);
                break;
            }
            event.start = set_time_on_date(day, *next_minute);
            event.end = set_time_on_date(day, end_minute);
            placed.push(event);
            *next_minute = end_minute + self.buffer_minutes;
        }
    }
}

/// Recompute today's flexible times.
///
/// Today is `now`'s date. The baseline is `start_override` (minute of day)
/// when set, otherwise `now`'s minute of day. Events on other days come
/// first, unchanged, followed by today's events in placement order.
pub fn layout(
    events: Vec<Event>,
    settings: &Settings,
    start_override: Option<i64>,
    now: NaiveDateTime,
) -> Vec<Event> {
    let today = now.date();
    let baseline = start_override.unwrap_or_else(|| minute_of_day(now));
    let (todays, mut others): (Vec<Event>, Vec<Event>) =
        events.into_iter().partition(|e| e.is_on(today));

    debug!(
        today = %today,
        baseline,
        count = todays.len(),
        "laying out day"
    );
    let laid_out = LayoutEngine::from_settings(settings).layout_day(todays, today, baseline);
    others.extend(laid_out);
    others
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    fn at(h: u32, m: u32) -> NaiveDateTime {
        day().and_hms_opt(h, m, 0).unwrap()
    }

    fn flex(title: &str, minutes: i64) -> Event {
        Event::lasting(title, at(20, 0), minutes)
    }

    fn pinned(title: &str, h: u32, m: u32, minutes: i64) -> Event {
        Event::lasting(title, at(h, m), minutes).with_pinned(true)
    }

    fn times(events: &[Event]) -> Vec<(&str, NaiveDateTime, NaiveDateTime)> {
        events
            .iter()
            .map(|e| (e.title.as_str(), e.start, e.end))
            .collect()
    }

    #[test]
    fn defers_flex_that_would_cross_anchor() {
        let engine = LayoutEngine::new(10);
        let events = vec![pinned("P", 9, 0, 30), flex("A", 30), flex("B", 30)];
        let out = engine.layout_day(events, day(), 8 * 60);
        assert_eq!(
            times(&out),
            vec![
                ("A", at(8, 0), at(8, 30)),
                ("P", at(9, 0), at(9, 30)),
                ("B", at(9, 40), at(10, 10)),
            ]
        );
    }

    #[test]
    fn flex_may_end_exactly_at_anchor() {
        let engine = LayoutEngine::new(0);
        let events = vec![flex("A", 60), pinned("P", 9, 0, 30)];
        let out = engine.layout_day(events, day(), 8 * 60);
        assert_eq!(
            times(&out),
            vec![("A", at(8, 0), at(9, 0)), ("P", at(9, 0), at(9, 30))]
        );
    }

    #[test]
    fn keeps_fifo_order_even_when_a_later_one_would_fit() {
        let engine = LayoutEngine::new(0);
        let events = vec![flex("Long", 90), flex("Short", 15), pinned("P", 9, 0, 30)];
        let out = engine.layout_day(events, day(), 8 * 60);
        assert_eq!(
            times(&out),
            vec![
                ("P", at(9, 0), at(9, 30)),
                ("Long", at(9, 30), at(11, 0)),
                ("Short", at(11, 0), at(11, 15)),
            ]
        );
    }

    #[test]
    fn pinned_are_sorted_and_never_moved() {
        let engine = LayoutEngine::new(5);
        let events = vec![
            pinned("Late", 13, 0, 60),
            flex("A", 45),
            pinned("Early", 10, 0, 30),
        ];
        let out = engine.layout_day(events, day(), 9 * 60);
        assert_eq!(
            times(&out),
            vec![
                ("A", at(9, 0), at(9, 45)),
                ("Early", at(10, 0), at(10, 30)),
                ("Late", at(13, 0), at(14, 0)),
            ]
        );
    }

    #[test]
    fn baseline_after_anchor_places_flex_after_it() {
        let engine = LayoutEngine::new(10);
        let events = vec![flex("A", 30), pinned("P", 9, 0, 30)];
        let out = engine.layout_day(events, day(), 12 * 60);
        assert_eq!(
            times(&out),
            vec![("P", at(9, 0), at(9, 30)), ("A", at(12, 0), at(12, 30))]
        );
    }

    #[test]
    fn preserves_rounded_flex_duration() {
        let engine = LayoutEngine::new(0);
        let mut odd = flex("Odd", 1);
        odd.end = odd.start + chrono::Duration::seconds(20);
        let out = engine.layout_day(vec![odd], day(), 600);
        assert_eq!(out[0].duration_minutes(), 1);
    }

    #[test]
    fn layout_keeps_other_days_untouched() {
        let tomorrow = Event::lasting(
            "Tomorrow",
            (day() + chrono::Duration::days(1)).and_hms_opt(9, 0, 0).unwrap(),
            30,
        );
        let events = vec![flex("A", 30), tomorrow.clone()];
        let settings = Settings {
            buffer_minutes: 0,
            ..Settings::default()
        };
        let out = layout(events, &settings, None, at(7, 15));
        assert_eq!(out[0], tomorrow);
        assert_eq!(out[1].start, at(7, 15));
        assert_eq!(out[1].end, at(7, 45));
    }

    #[test]
    fn layout_uses_start_override() {
        let settings = Settings::default();
        let out = layout(vec![flex("A", 30)], &settings, Some(6 * 60), at(14, 0));
        assert_eq!(out[0].start, at(6, 0));
    }
}
