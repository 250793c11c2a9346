//! Planner: owns the state and runs the pipeline after every change.
//!
//! Every mutation (a prompt, raw operations, an edit, an import) ends with a
//! recompute: today's flexible events are laid out around their pinned
//! anchors, the stored events take the layout result, and the resolver's
//! buffered, conflict-free view of today becomes the observable timeline.
//! When a [`ReminderScheduler`] is attached it receives the full reminder
//! list after each pass.

use chrono::{NaiveDateTime, Utc};
use serde::Serialize;
use tracing::debug;

use crate::apply::{apply_operations, ApplySummary};
use crate::edit::EditAction;
use crate::error::{ConfigError, ImportError, ValidationError};
use crate::event::Event;
use crate::interpreter::interpret;
use crate::layout::layout;
use crate::operation::Operation;
use crate::reminders::{compute_reminders, Reminder, ReminderScheduler};
use crate::resolver::resolve;
use crate::settings::Settings;
use crate::state::PlannerState;

/// What a prompt turned into and what it changed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Submission {
    pub operations: Vec<Operation>,
    pub summary: ApplySummary,
}

pub struct Planner {
    state: PlannerState,
    start_override: Option<i64>,
    timeline: Vec<Event>,
    scheduler: Option<Box<dyn ReminderScheduler>>,
}

impl std::fmt::Debug for Planner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Planner")
            .field("state", &self.state)
            .field("start_override", &self.start_override)
            .field("timeline", &self.timeline)
            .field("scheduler", &self.scheduler.is_some())
            .finish()
    }
}

impl Planner {
    /// Wrap `state` and run the pipeline once.
    pub fn new(state: PlannerState, start_override: Option<i64>, now: NaiveDateTime) -> Self {
        let mut planner = Self {
            state,
            start_override,
            timeline: Vec::new(),
            scheduler: None,
        };
        planner.recompute(now);
        planner
    }

    /// Attach a scheduler and hand it the current reminders.
    pub fn with_scheduler(
        mut self,
        scheduler: Box<dyn ReminderScheduler>,
        now: NaiveDateTime,
    ) -> Self {
        self.scheduler = Some(scheduler);
        self.notify(now);
        self
    }

    pub fn state(&self) -> &PlannerState {
        &self.state
    }

    pub fn into_state(self) -> PlannerState {
        self.state
    }

    pub fn events(&self) -> &[Event] {
        &self.state.events
    }

    pub fn settings(&self) -> &Settings {
        &self.state.settings
    }

    pub fn start_override(&self) -> Option<i64> {
        self.start_override
    }

    /// Today's events, resolved, in start order.
    pub fn timeline(&self) -> &[Event] {
        &self.timeline
    }

    /// Interpret free text, apply the result, recompute.
    pub fn submit(&mut self, text: &str, now: NaiveDateTime) -> Submission {
        let interpretation = interpret(text, &self.state, now);
        let summary = self.apply(&interpretation.operations, now);
        Submission {
            operations: interpretation.operations,
            summary,
        }
    }

    /// Apply operations in order, then recompute.
    pub fn apply(&mut self, operations: &[Operation], now: NaiveDateTime) -> ApplySummary {
        let summary = apply_operations(&mut self.state.events, operations, Utc::now());
        self.recompute(now);
        summary
    }

    /// Run one edit, then recompute.
    ///
    /// # Errors
    /// Returns the edit's validation error; state is unchanged in that case.
    pub fn edit(
        &mut self,
        action: &EditAction,
        now: NaiveDateTime,
    ) -> Result<&'static str, ValidationError> {
        let outcome = action.apply(&mut self.state.events, &mut self.start_override, Utc::now())?;
        self.recompute(now);
        Ok(outcome)
    }

    /// Change one setting (clamped), then recompute.
    ///
    /// # Errors
    /// Returns an error for an unknown key.
    pub fn set_setting(
        &mut self,
        key: &str,
        value: &str,
        now: NaiveDateTime,
    ) -> Result<u32, ConfigError> {
        let stored = self.state.settings.set(key, value)?;
        self.recompute(now);
        Ok(stored)
    }

    /// Replace settings wholesale, then recompute.
    pub fn replace_settings(&mut self, settings: Settings, now: NaiveDateTime) {
        self.state.settings = settings.clamped();
        self.recompute(now);
    }

    /// Lay out today, resolve it into the timeline, notify the scheduler.
    pub fn recompute(&mut self, now: NaiveDateTime) {
        let events = std::mem::take(&mut self.state.events);
        self.state.events = layout(events, &self.state.settings, self.start_override, now);

        let today = now.date();
        let todays: Vec<Event> = self
            .state
            .events
            .iter()
            .filter(|e| e.is_on(today))
            .cloned()
            .collect();
        self.timeline = resolve(todays, self.state.settings.buffer());
        debug!(
            events = self.state.events.len(),
            today = self.timeline.len(),
            "pipeline recomputed"
        );
        self.notify(now);
    }

    /// Reminders over the stored events with today's entries at their
    /// resolved times.
    pub fn reminders(&self, now: NaiveDateTime) -> Vec<Reminder> {
        let today = now.date();
        let mut events: Vec<Event> = self
            .state
            .events
            .iter()
            .filter(|e| !e.is_on(today))
            .cloned()
            .collect();
        events.extend(self.timeline.iter().cloned());
        compute_reminders(&events, self.state.settings.notification_lead_minutes, now)
    }

    /// Replace the whole state with an exported document.
    ///
    /// # Errors
    /// Returns why the document was refused; state is unchanged in that case.
    pub fn import_json(&mut self, text: &str, now: NaiveDateTime) -> Result<(), ImportError> {
        self.state = PlannerState::from_json(text)?;
        self.recompute(now);
        Ok(())
    }

    pub fn export_json(&self) -> serde_json::Result<String> {
        self.state.to_json()
    }

    fn notify(&mut self, now: NaiveDateTime) {
        if self.scheduler.is_none() {
            return;
        }
        let reminders = self.reminders(now);
        if let Some(scheduler) = self.scheduler.as_mut() {
            scheduler.reschedule(&reminders);
        }
    }
}
