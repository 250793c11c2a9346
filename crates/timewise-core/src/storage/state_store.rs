//! JSON state file (`state.json`) in the data directory.

use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use tracing::{debug, info};

use super::data_dir;
use crate::error::{Result, StorageError};
use crate::event::Event;
use crate::settings::Settings;
use crate::state::PlannerState;
use crate::time::set_time_on_date;

pub const STATE_FILE_NAME: &str = "state.json";

/// Title of the event a fresh install starts with.
pub const SAMPLE_EVENT_TITLE: &str = "Welcome sample study block";

/// Reads and writes [`PlannerState`] on disk.
#[derive(Debug, Clone)]
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    /// Store backed by `state.json` inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(STATE_FILE_NAME),
        }
    }

    /// Store in the default data directory.
    ///
    /// # Errors
    /// Returns an error if the data directory cannot be created.
    pub fn open() -> Result<Self, StorageError> {
        Ok(Self::in_dir(data_dir()?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the state file. `Ok(None)` when it does not exist yet.
    ///
    /// # Errors
    /// Returns [`StorageError::Corrupt`] when the file exists but does not
    /// hold valid state.
    pub fn load(&self) -> Result<Option<PlannerState>, StorageError> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(StorageError::ReadFailed {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        PlannerState::from_json(&text)
            .map(Some)
            .map_err(|e| StorageError::Corrupt {
                path: self.path.clone(),
                reason: e.to_string(),
            })
    }

    /// Load existing state, or seed and persist a sample day.
    ///
    /// The seed holds default settings and one event today from 17:00 to
    /// 18:00. A corrupt file is returned as an error and left in place.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, is corrupt, or the seed
    /// cannot be written.
    pub fn load_or_init(&self, now: NaiveDateTime) -> Result<PlannerState, StorageError> {
        if let Some(state) = self.load()? {
            debug!(path = %self.path.display(), events = state.events.len(), "state loaded");
            return Ok(state);
        }

        let today = now.date();
        let sample = Event::lasting(SAMPLE_EVENT_TITLE, set_time_on_date(today, 17 * 60), 60);
        let state = PlannerState::new(Settings::default(), vec![sample]);
        self.save(&state)?;
        info!(path = %self.path.display(), "initialized new state file");
        Ok(state)
    }

    /// Persist to disk.
    ///
    /// # Errors
    /// Returns an error if the state cannot be written.
    pub fn save(&self, state: &PlannerState) -> Result<(), StorageError> {
        write_state(&self.path, state)
    }

    /// Write `state` to an arbitrary path in the export format.
    ///
    /// # Errors
    /// Returns an error if the file cannot be written.
    pub fn export_to(&self, state: &PlannerState, path: impl AsRef<Path>) -> Result<()> {
        write_state(path.as_ref(), state)?;
        Ok(())
    }

    /// Validate an exported file and make it the stored state.
    ///
    /// Nothing is written unless the file validates. The current file is
    /// never read, so a corrupt store can be recovered this way.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, fails validation, or
    /// the store cannot be written.
    pub fn import_from(&self, path: impl AsRef<Path>) -> Result<PlannerState> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let state = PlannerState::from_json(&text)?;
        self.save(&state)?;
        info!(events = state.events.len(), "state imported");
        Ok(state)
    }
}

fn write_state(path: &Path, state: &PlannerState) -> Result<(), StorageError> {
    let json = state.to_json().map_err(|e| StorageError::WriteFailed {
        path: path.to_path_buf(),
        source: std::io::Error::new(std::io::ErrorKind::InvalidData, e),
    })?;
    std::fs::write(path, json).map_err(|source| StorageError::WriteFailed {
        path: path.to_path_buf(),
        source,
    })
}
