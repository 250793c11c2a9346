//! Upcoming-event reminders.
//!
//! Reminders are always recomputed from scratch: callers hand the full list to
//! a [`ReminderScheduler`] after every planner pass, and the scheduler
//! replaces whatever it had before.

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::event::Event;
use crate::time::format_time_hm;

/// How far ahead reminders are computed.
pub const REMINDER_HORIZON_HOURS: i64 = 24;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reminder {
    pub event_id: String,
    pub title: String,
    pub starts_at: NaiveDateTime,
    pub fire_at: NaiveDateTime,
}

impl Reminder {
    /// Notification heading.
    pub fn heading(&self) -> String {
        format!("Upcoming: {}", self.title)
    }

    /// Notification body.
    pub fn body(&self) -> String {
        format!("Starts at {}", format_time_hm(self.starts_at))
    }
}

/// Receives the complete reminder list after each recompute.
pub trait ReminderScheduler {
    fn reschedule(&mut self, reminders: &[Reminder]);
}

/// Scheduler that just keeps the latest list.
#[derive(Debug, Default, Clone)]
pub struct InMemoryScheduler {
    pub scheduled: Vec<Reminder>,
    pub passes: usize,
}

impl ReminderScheduler for InMemoryScheduler {
    fn reschedule(&mut self, reminders: &[Reminder]) {
        self.scheduled = reminders.to_vec();
        self.passes += 1;
    }
}

/// Reminders for open events starting within the next 24 hours.
///
/// Done and canceled events are skipped, as are events starting at or before
/// `now`. `fire_at` is the start minus `lead_minutes`; results are sorted by it.
pub fn compute_reminders(events: &[Event], lead_minutes: u32, now: NaiveDateTime) -> Vec<Reminder> {
    let horizon = now + Duration::hours(REMINDER_HORIZON_HOURS);
    let lead = Duration::minutes(i64::from(lead_minutes));

    let mut reminders: Vec<Reminder> = events
        .iter()
        .filter(|e| !e.status.is_closed())
        .filter(|e| e.start > now && e.start <= horizon)
        .map(|e| Reminder {
            event_id: e.id.clone(),
            title: e.title.clone(),
            starts_at: e.start,
            fire_at: e.start - lead,
        })
        .collect();
    reminders.sort_by_key(|r| r.fire_at);
    reminders
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventStatus;
    use chrono::NaiveDate;

    fn at(day: u32, h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, day)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn window_and_status_filtering() {
        let now = at(19, 12, 0);
        let events = vec![
            Event::lasting("Later", at(19, 18, 0), 30),
            Event::lasting("Past", at(19, 11, 0), 30),
            Event::lasting("Starting now", now, 30),
            Event::lasting("Soon", at(19, 13, 0), 30),
            Event::lasting("Done", at(19, 14, 0), 30).with_status(EventStatus::Done),
            Event::lasting("Canceled", at(19, 15, 0), 30).with_status(EventStatus::Canceled),
            Event::lasting("Tomorrow noon", at(20, 12, 0), 30),
            Event::lasting("Too far", at(20, 12, 1), 30),
        ];
        let reminders = compute_reminders(&events, 10, now);
        let titles: Vec<&str> = reminders.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["Soon", "Later", "Tomorrow noon"]);
        assert_eq!(reminders[0].fire_at, at(19, 12, 50));
    }

    #[test]
    fn reminder_text() {
        let event = Event::lasting("Gym", at(19, 18, 5), 60);
        let reminders = compute_reminders(&[event], 0, at(19, 9, 0));
        assert_eq!(reminders[0].heading(), "Upcoming: Gym");
        assert_eq!(reminders[0].body(), "Starts at 6:05 PM");
        assert_eq!(reminders[0].fire_at, reminders[0].starts_at);
    }

    #[test]
    fn in_memory_scheduler_replaces_list() {
        let mut scheduler = InMemoryScheduler::default();
        let event = Event::lasting("Gym", at(19, 18, 0), 60);
        let reminders = compute_reminders(&[event], 5, at(19, 9, 0));
        scheduler.reschedule(&reminders);
        scheduler.reschedule(&[]);
        assert!(scheduler.scheduled.is_empty());
        assert_eq!(scheduler.passes, 2);
    }
}
