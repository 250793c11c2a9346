//! Event editing commands for CLI.

use clap::Subcommand;
use timewise_core::time::parse_time_of_day;
use timewise_core::{EditAction, EventStatus};

use super::today::print_events;
use super::Session;

#[derive(Subcommand)]
pub enum EventAction {
    /// List all stored events
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Mark an event as done
    Done {
        /// Event ID
        id: String,
    },
    /// Delete an event
    Delete {
        /// Event ID
        id: String,
    },
    /// Pin an event, optionally at a new time of day
    Pin {
        /// Event ID
        id: String,
        /// Time of day, e.g. "14:30" or "2:30pm"
        #[arg(long)]
        at: Option<String>,
    },
    /// Unpin an event so it is packed with the flexible ones
    Unpin {
        /// Event ID
        id: String,
    },
    /// Set the status (scheduled, in-progress, done, canceled)
    Status {
        /// Event ID
        id: String,
        status: String,
    },
    /// Rename an event
    Rename {
        /// Event ID
        id: String,
        /// New title
        #[arg(required = true, num_args = 1..)]
        title: Vec<String>,
    },
    /// Lengthen or shorten an event by a number of minutes
    Duration {
        /// Event ID
        id: String,
        /// Minutes to add (negative to shorten)
        #[arg(allow_hyphen_values = true)]
        delta: i64,
    },
    /// Put events first in the given order; the rest follow unchanged
    Reorder {
        /// Event IDs
        #[arg(required = true, num_args = 1..)]
        ids: Vec<String>,
    },
}

pub fn run(action: EventAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = Session::open()?;

    let edit = match action {
        EventAction::List { json } => {
            let mut events = session.planner.events().to_vec();
            events.sort_by_key(|e| e.start);
            if json {
                println!("{}", serde_json::to_string_pretty(&events)?);
            } else {
                print_events(&events);
            }
            return Ok(());
        }
        EventAction::Done { id } => EditAction::MarkDone { id },
        EventAction::Delete { id } => EditAction::DeleteEvent { id },
        EventAction::Pin { id, at: None } => EditAction::TogglePin { id, pinned: true },
        EventAction::Pin { id, at: Some(at) } => {
            let minutes =
                parse_time_of_day(&at).ok_or_else(|| format!("invalid time of day: {at}"))?;
            EditAction::SetPinnedTime { id, minutes }
        }
        EventAction::Unpin { id } => EditAction::TogglePin { id, pinned: false },
        EventAction::Status { id, status } => EditAction::SetStatus {
            id,
            status: status.parse::<EventStatus>()?,
        },
        EventAction::Rename { id, title } => EditAction::Rename {
            id,
            title: title.join(" "),
        },
        EventAction::Duration { id, delta } => EditAction::AdjustDuration {
            id,
            delta_minutes: delta,
        },
        EventAction::Reorder { ids } => EditAction::Resequence { order: ids },
    };

    let now = session.now();
    let outcome = session.planner.edit(&edit, now)?;
    session.save()?;
    println!("{outcome}");
    Ok(())
}
