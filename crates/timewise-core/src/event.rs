//! Event types and utilities.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;
use crate::time::{add_minutes, minutes_between};

/// Title used whenever a title would otherwise be empty.
pub const DEFAULT_TITLE: &str = "Task";

/// Lifecycle status of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum EventStatus {
    #[default]
    Scheduled,
    InProgress,
    Done,
    Canceled,
}

impl EventStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Scheduled => "scheduled",
            Self::InProgress => "in-progress",
            Self::Done => "done",
            Self::Canceled => "canceled",
        }
    }

    /// Done and canceled events no longer need reminders.
    pub fn is_closed(&self) -> bool {
        matches!(self, Self::Done | Self::Canceled)
    }
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "scheduled" => Ok(Self::Scheduled),
            "in-progress" | "in_progress" | "inprogress" => Ok(Self::InProgress),
            "done" => Ok(Self::Done),
            "canceled" | "cancelled" => Ok(Self::Canceled),
            other => Err(ValidationError::InvalidValue {
                field: "status".to_string(),
                message: format!("unknown status '{other}'"),
            }),
        }
    }
}

/// A schedulable unit on the day plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub title: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    #[serde(default)]
    pub status: EventStatus,
    /// Pinned events keep their clock time through layout.
    #[serde(default)]
    pub pinned: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Event {
    /// Create a scheduled, unpinned event with a fresh id.
    ///
    /// A blank title becomes [`DEFAULT_TITLE`].
    ///
    /// # Errors
    /// Returns an error if `end <= start`.
    pub fn try_new(
        title: impl Into<String>,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Self, ValidationError> {
        if end <= start {
            return Err(ValidationError::InvalidTimeRange { start, end });
        }
        let mut event = Self::lasting(title, start, 1);
        event.end = end;
        Ok(event)
    }

    /// Scheduled event lasting `minutes` (at least one).
    pub fn lasting(title: impl Into<String>, start: NaiveDateTime, minutes: i64) -> Self {
        let now = Utc::now();
        let title = title.into();
        Self {
            id: generate_event_id(),
            title: if title.trim().is_empty() {
                DEFAULT_TITLE.to_string()
            } else {
                title.trim().to_string()
            },
            start,
            end: add_minutes(start, minutes.max(1)),
            status: EventStatus::Scheduled,
            pinned: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Same event content under a new id, moved to `start` with the same length.
    pub fn occurrence_at(&self, start: NaiveDateTime) -> Self {
        Self {
            id: generate_event_id(),
            start,
            end: start + (self.end - self.start),
            ..self.clone()
        }
    }

    /// Duration in whole minutes, rounded.
    pub fn duration_minutes(&self) -> i64 {
        minutes_between(self.start, self.end)
    }

    /// Day the event starts on.
    pub fn day(&self) -> NaiveDate {
        self.start.date()
    }

    pub fn is_on(&self, day: NaiveDate) -> bool {
        self.day() == day
    }

    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && self.end > other.start
    }

    /// Move start and end by the same amount.
    pub fn shift_minutes(&mut self, minutes: i64) {
        self.start = add_minutes(self.start, minutes);
        self.end = add_minutes(self.end, minutes);
    }

    pub fn touch(&mut self, at: DateTime<Utc>) {
        self.updated_at = at;
    }

    pub fn with_pinned(mut self, pinned: bool) -> Self {
        self.pinned = pinned;
        self
    }

    pub fn with_status(mut self, status: EventStatus) -> Self {
        self.status = status;
        self
    }
}

/// `evt_<unix millis>_<8 hex chars>`.
pub fn generate_event_id() -> String {
    let simple = uuid::Uuid::new_v4().simple().to_string();
    format!("evt_{}_{}", Utc::now().timestamp_millis(), &simple[..8])
}
