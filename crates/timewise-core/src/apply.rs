//! Applies interpreter operations to the event collection.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use crate::event::Event;
use crate::operation::Operation;

/// What a batch of operations changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ApplySummary {
    pub added: usize,
    pub moved: usize,
    pub deleted: usize,
    pub shifted: usize,
}

impl ApplySummary {
    pub fn is_empty(&self) -> bool {
        self.added + self.moved + self.deleted + self.shifted == 0
    }
}

/// Apply `operations` in order. Touched events get `updated_at = now`.
pub fn apply_operations(
    events: &mut Vec<Event>,
    operations: &[Operation],
    now: DateTime<Utc>,
) -> ApplySummary {
    let mut summary = ApplySummary::default();

    for op in operations {
        debug!(kind = op.kind(), "applying operation");
        match op {
            Operation::AddEvent { event } => {
                events.push(event.clone());
                summary.added += 1;
            }
            Operation::MoveEvent { id, start, end } => {
                match events.iter_mut().find(|e| &e.id == id) {
                    Some(event) => {
                        event.start = *start;
                        event.end = *end;
                        event.touch(now);
                        summary.moved += 1;
                    }
                    None => debug!(%id, "move target no longer exists"),
                }
            }
            Operation::DeleteByTitle { title } => {
                let needle = title.to_lowercase();
                let before = events.len();
                events.retain(|e| !e.title.to_lowercase().contains(&needle));
                summary.deleted += before - events.len();
            }
            Operation::ShiftDay {
                date,
                delta_minutes,
            } => {
                for event in events.iter_mut().filter(|e| e.is_on(*date)) {
                    event.shift_minutes(*delta_minutes);
                    event.touch(now);
                    summary.shifted += 1;
                }
            }
        }
    }

    debug!(?summary, "operations applied");
    summary
}
