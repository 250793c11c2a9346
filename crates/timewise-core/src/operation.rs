//! Operations: the interpreter's output and the applier's input.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::event::Event;

/// A single state mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Operation {
    AddEvent {
        event: Event,
    },
    MoveEvent {
        id: String,
        start: NaiveDateTime,
        end: NaiveDateTime,
    },
    /// Removes every event whose title contains `title`, case-insensitively.
    DeleteByTitle {
        title: String,
    },
    #[serde(rename_all = "camelCase")]
    ShiftDay {
        date: NaiveDate,
        delta_minutes: i64,
    },
}

impl Operation {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::AddEvent { .. } => "addEvent",
            Self::MoveEvent { .. } => "moveEvent",
            Self::DeleteByTitle { .. } => "deleteByTitle",
            Self::ShiftDay { .. } => "shiftDay",
        }
    }
}
