//! The persisted planner state: `{settings, events}` as JSON.

use serde::{Deserialize, Serialize};

use crate::error::ImportError;
use crate::event::Event;
use crate::settings::Settings;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PlannerState {
    pub settings: Settings,
    pub events: Vec<Event>,
}

impl PlannerState {
    pub fn new(settings: Settings, events: Vec<Event>) -> Self {
        Self { settings, events }
    }

    /// Pretty JSON in the interchange shape.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Parse and validate an exported document.
    ///
    /// Both `events` and `settings` must be present at the top level. Settings
    /// are clamped; events that end at or before their start are refused.
    ///
    /// # Errors
    /// Returns an [`ImportError`] describing the first problem found.
    pub fn from_json(text: &str) -> Result<Self, ImportError> {
        let value: serde_json::Value =
            serde_json::from_str(text).map_err(|e| ImportError::Unparseable(e.to_string()))?;

        let object = value
            .as_object()
            .ok_or_else(|| ImportError::InvalidShape("top level is not an object".into()))?;
        if !object.contains_key("events") {
            return Err(ImportError::MissingKey("events"));
        }
        if !object.contains_key("settings") {
            return Err(ImportError::MissingKey("settings"));
        }

        let state: PlannerState =
            serde_json::from_value(value).map_err(|e| ImportError::InvalidShape(e.to_string()))?;

        if let Some(bad) = state.events.iter().find(|e| e.end <= e.start) {
            return Err(ImportError::InvalidEventRange { id: bad.id.clone() });
        }

        Ok(Self {
            settings: state.settings.clamped(),
            events: state.events,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample() -> PlannerState {
        let day = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let event = Event::lasting("Gym", day.and_hms_opt(17, 0, 0).unwrap(), 60).with_pinned(true);
        PlannerState::new(Settings::default(), vec![event])
    }

    #[test]
    fn export_import_roundtrip() {
        let state = sample();
        let json = state.to_json().unwrap();
        let imported = PlannerState::from_json(&json).unwrap();
        assert_eq!(imported, state);
    }

    #[test]
    fn import_requires_both_keys() {
        assert!(matches!(
            PlannerState::from_json(r#"{"settings": {}}"#),
            Err(ImportError::MissingKey("events"))
        ));
        assert!(matches!(
            PlannerState::from_json(r#"{"events": []}"#),
            Err(ImportError::MissingKey("settings"))
        ));
    }

    #[test]
    fn import_rejects_garbage() {
        assert!(matches!(
            PlannerState::from_json("not json"),
            Err(ImportError::Unparseable(_))
        ));
        assert!(matches!(
            PlannerState::from_json("[1, 2]"),
            Err(ImportError::InvalidShape(_))
        ));
        assert!(matches!(
            PlannerState::from_json(r#"{"events": 3, "settings": {}}"#),
            Err(ImportError::InvalidShape(_))
        ));
    }

    #[test]
    fn import_fills_and_clamps_settings() {
        let state =
            PlannerState::from_json(r#"{"events": [], "settings": {"dayEndHour": 48}}"#).unwrap();
        assert_eq!(state.settings.day_end_hour, 23);
        assert_eq!(state.settings.buffer_minutes, 5);
    }

    #[test]
    fn import_rejects_inverted_event() {
        let json = r#"{
            "settings": {},
            "events": [{
                "id": "evt_bad",
                "title": "Backwards",
                "start": "2026-10-19T10:00:00",
                "end": "2026-10-19T09:00:00",
                "status": "scheduled",
                "createdAt": "2026-10-19T08:00:00Z",
                "updatedAt": "2026-10-19T08:00:00Z"
            }]
        }"#;
        assert!(matches!(
            PlannerState::from_json(json),
            Err(ImportError::InvalidEventRange { id }) if id == "evt_bad"
        ));
    }
}
