//! # Timewise Core Library
//!
//! This library provides the core logic for Timewise, a personal day planner
//! driven by short free-text prompts ("add study block at 6pm for 45m",
//! "move gym to 7pm for 1h", "running late by 15m"). It follows a CLI-first
//! philosophy: every operation is available through the `timewise` binary,
//! which is a thin layer over this crate.
//!
//! ## Architecture
//!
//! - **Interpreter**: an ordered rule table turns an utterance into
//!   [`Operation`]s, falling back to adding an event
//! - **Layout**: packs flexible events around pinned anchors for today
//! - **Resolver**: enforces the buffer between events and removes overlaps
//! - **Planner**: owns the state and reruns the pipeline after every change
//! - **Storage**: JSON state file and TOML configuration in the data directory
//!
//! ## Key Components
//!
//! - [`Planner`]: state container and pipeline driver
//! - [`interpret`]: utterance to operations
//! - [`StateStore`]: persisted planner state
//! - [`Config`]: application configuration management

pub mod apply;
pub mod edit;
pub mod error;
pub mod event;
pub mod interpreter;
pub mod layout;
pub mod operation;
pub mod planner;
pub mod reminders;
pub mod resolver;
pub mod settings;
pub mod state;
pub mod storage;
pub mod time;

pub use apply::{apply_operations, ApplySummary};
pub use edit::EditAction;
pub use error::{ConfigError, CoreError, ImportError, StorageError, ValidationError};
pub use event::{Event, EventStatus};
pub use interpreter::{interpret, Interpretation};
pub use layout::{layout, LayoutEngine};
pub use operation::Operation;
pub use planner::{Planner, Submission};
pub use reminders::{compute_reminders, InMemoryScheduler, Reminder, ReminderScheduler};
pub use resolver::resolve;
pub use settings::Settings;
pub use state::PlannerState;
pub use storage::{data_dir, Config, StateStore};
