//! Buffer and conflict resolution over a day's events.
//!
//! Two independent forward sweeps over the list sorted by start. Each sweep
//! only ever moves an event later and compares it with the already-adjusted
//! event before it, so one pass per sweep is enough.
//!
//! [`resolve`] is not idempotent in general: the conflict sweep can leave a
//! gap shorter than the buffer, which a second call then widens. Resolving
//! again changes nothing only when no such gap is left behind.

use chrono::Duration;
use tracing::debug;

use crate::event::Event;

/// Enforce the buffer, then remove overlaps.
pub fn resolve(events: Vec<Event>, buffer_minutes: i64) -> Vec<Event> {
    let buffered = insert_buffers(events, buffer_minutes);
    shift_conflicts(buffered)
}

/// Push an event later when the gap before it is positive but shorter than
/// the buffer. Touching and overlapping events are left to the conflict pass.
pub fn insert_buffers(mut events: Vec<Event>, buffer_minutes: i64) -> Vec<Event> {
    events.sort_by_key(|e| e.start);
    if buffer_minutes <= 0 {
        return events;
    }
    let buffer = Duration::minutes(buffer_minutes);

    for i in 1..events.len() {
        let gap = events[i].start - events[i - 1].end;
        if gap > Duration::zero() && gap < buffer {
            let shortfall = buffer - gap;
            let current = &mut events[i];
            current.start += shortfall;
            current.end += shortfall;
            debug!(id = %current.id, shortfall_secs = shortfall.num_seconds(), "buffer inserted");
        }
    }
    events
}

/// Push an event later so it starts where the previous one ends, rounding
/// the shift up to whole minutes.
pub fn shift_conflicts(mut events: Vec<Event>) -> Vec<Event> {
    events.sort_by_key(|e| e.start);

    for i in 1..events.len() {
        if !events[i].overlaps(&events[i - 1]) {
            continue;
        }
        let prev_end = events[i - 1].end;
        let current = &mut events[i];
        let overlap_ms = (prev_end - current.start).num_milliseconds();
        let minutes = (overlap_ms + 59_999) / 60_000;
        current.shift_minutes(minutes);
        debug!(id = %current.id, minutes, "overlap shifted");
    }
    events
}
