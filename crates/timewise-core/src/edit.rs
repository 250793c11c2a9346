//! Direct edits to individual events (reorder, pin, rename, status, ...).
//!
//! Every action either succeeds with a short outcome label or fails with a
//! [`ValidationError`] and leaves the events untouched.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ValidationError;
use crate::event::{Event, EventStatus};
use crate::time::{add_minutes, set_time_on_date, MINUTES_PER_DAY};

/// A single user edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum EditAction {
    /// Listed ids first, in this order; everything else keeps its relative order after them.
    Resequence { order: Vec<String> },
    #[serde(rename_all = "camelCase")]
    AdjustDuration { id: String, delta_minutes: i64 },
    TogglePin { id: String, pinned: bool },
    /// Pin at `minutes` past midnight on the event's own day.
    SetPinnedTime { id: String, minutes: i64 },
    /// `None` clears the override and packing starts from now.
    SetStartAt { minutes: Option<i64> },
    MarkDone { id: String },
    DeleteEvent { id: String },
    Rename { id: String, title: String },
    SetStatus { id: String, status: EventStatus },
}

impl EditAction {
    /// Label shown after the action succeeds.
    pub fn outcome(&self) -> &'static str {
        match self {
            Self::Resequence { .. } => "Reordered",
            Self::AdjustDuration { .. } => "Duration updated",
            Self::TogglePin { .. } => "Pin updated",
            Self::SetPinnedTime { .. } => "Pinned time set",
            Self::SetStartAt { .. } => "Start time updated",
            Self::MarkDone { .. } => "Marked as done",
            Self::DeleteEvent { .. } => "Deleted",
            Self::Rename { .. } => "Renamed",
            Self::SetStatus { .. } => "Status updated",
        }
    }

    /// Apply the action.
    ///
    /// `start_override` is the planner's start-of-day override in minutes
    /// past midnight; only [`EditAction::SetStartAt`] touches it.
    ///
    /// # Errors
    /// Unknown ids, out-of-range minutes, a duration change that would end
    /// the event at or before its start, and blank titles are refused.
    pub fn apply(
        &self,
        events: &mut Vec<Event>,
        start_override: &mut Option<i64>,
        now: DateTime<Utc>,
    ) -> Result<&'static str, ValidationError> {
        match self {
            Self::Resequence { order } => {
                resequence(events, order);
            }
            Self::AdjustDuration { id, delta_minutes } => {
                let event = find_mut(events, id)?;
                let end = add_minutes(event.end, *delta_minutes);
                if end <= event.start {
                    return Err(ValidationError::InvalidTimeRange {
                        start: event.start,
                        end,
                    });
                }
                event.end = end;
                event.touch(now);
            }
            Self::TogglePin { id, pinned } => {
                let event = find_mut(events, id)?;
                event.pinned = *pinned;
                event.touch(now);
            }
            Self::SetPinnedTime { id, minutes } => {
                check_minute_of_day("minutes", *minutes)?;
                let event = find_mut(events, id)?;
                let length = event.end - event.start;
                event.start = set_time_on_date(event.day(), *minutes);
                event.end = event.start + length;
                event.pinned = true;
                event.touch(now);
            }
            Self::SetStartAt { minutes } => {
                if let Some(minutes) = minutes {
                    check_minute_of_day("startAt", *minutes)?;
                }
                *start_override = *minutes;
            }
            Self::MarkDone { id } => {
                let event = find_mut(events, id)?;
                event.status = EventStatus::Done;
                event.touch(now);
            }
            Self::DeleteEvent { id } => {
                let index = events
                    .iter()
                    .position(|e| &e.id == id)
                    .ok_or_else(|| ValidationError::UnknownEvent(id.clone()))?;
                events.remove(index);
            }
            Self::Rename { id, title } => {
                let title = title.trim();
                if title.is_empty() {
                    return Err(ValidationError::InvalidValue {
                        field: "title".into(),
                        message: "title cannot be blank".into(),
                    });
                }
                let event = find_mut(events, id)?;
                event.title = title.to_string();
                event.touch(now);
            }
            Self::SetStatus { id, status } => {
                let event = find_mut(events, id)?;
                event.status = *status;
                event.touch(now);
            }
        }

        debug!(action = ?self, "edit applied");
        Ok(self.outcome())
    }
}

fn find_mut<'a>(events: &'a mut [Event], id: &str) -> Result<&'a mut Event, ValidationError> {
    events
        .iter_mut()
        .find(|e| e.id == id)
        .ok_or_else(|| ValidationError::UnknownEvent(id.to_string()))
}

fn check_minute_of_day(field: &str, minutes: i64) -> Result<(), ValidationError> {
    if (0..MINUTES_PER_DAY).contains(&minutes) {
        Ok(())
    } else {
        Err(ValidationError::InvalidValue {
            field: field.to_string(),
            message: format!("{minutes} is not a minute of the day"),
        })
    }
}

fn resequence(events: &mut Vec<Event>, order: &[String]) {
    let mut remaining = std::mem::take(events);
    for id in order {
        if let Some(index) = remaining.iter().position(|e| &e.id == id) {
            events.push(remaining.remove(index));
        } else {
            debug!(%id, "unknown id in resequence ignored");
        }
    }
    events.extend(remaining);
}
