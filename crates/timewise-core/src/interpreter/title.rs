//! Title extraction and fuzzy title matching.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::event::{Event, DEFAULT_TITLE};

static LEADING_VERB_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(add|schedule|create|plan|move|reschedule|delete|cancel|remove)\s+")
        .expect("valid verb regex")
});

/// First place a title stops: a connective with spaces on both sides, or a
/// relative-day word.
static BOUNDARY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i) (?:(?:at|from|to|on|for|by) |tomorrow|today)").expect("valid boundary regex")
});

/// Pull the subject out of an utterance.
///
/// `"Add study block at 6pm"` → `"study block"`. Falls back to
/// [`DEFAULT_TITLE`] when nothing is left.
pub fn extract_title(raw: &str) -> String {
    let trimmed = raw.trim();
    let stripped = LEADING_VERB_RE.replace(trimmed, "");
    let cut = BOUNDARY_RE
        .find(&stripped)
        .map_or(stripped.len(), |m| m.start());
    let title = stripped[..cut].trim();
    if title.is_empty() {
        DEFAULT_TITLE.to_string()
    } else {
        title.to_string()
    }
}

/// Share of the title covered by the query, or 0 when the title doesn't
/// contain it.
pub fn match_score(title: &str, query: &str) -> f64 {
    let title = title.to_lowercase();
    let query = query.to_lowercase();
    let title_len = title.chars().count();
    if title_len == 0 || !title.contains(&query) {
        return 0.0;
    }
    query.chars().count() as f64 / title_len as f64
}

/// Best-scoring event whose title contains `query`. Ties keep the earliest.
pub fn find_event_by_title_fuzzy<'a>(events: &'a [Event], query: &str) -> Option<&'a Event> {
    let mut best: Option<(&Event, f64)> = None;
    for event in events {
        let score = match_score(&event.title, query);
        if score <= 0.0 {
            continue;
        }
        if best.map_or(true, |(_, top)| score > top) {
            best = Some((event, score));
        }
    }
    best.map(|(event, _)| event)
}
