//! Load the planner from the data directory and write it back.

use std::path::PathBuf;

use chrono::{Local, NaiveDateTime};
use timewise_core::{data_dir, Config, CoreError, Planner, StateStore};
use tracing::debug;

pub struct Session {
    dir: PathBuf,
    store: StateStore,
    config: Config,
    now: NaiveDateTime,
    pub planner: Planner,
}

impl Session {
    /// Open the stored state (seeding it on first run) with the configured
    /// start-of-day override.
    pub fn open() -> Result<Self, CoreError> {
        let dir = data_dir()?;
        let config = Config::load_from(&dir)?;
        let store = StateStore::in_dir(&dir);
        let now = Local::now().naive_local();
        let state = store.load_or_init(now)?;
        let planner = Planner::new(state, config.start_override(), now);
        debug!(dir = %dir.display(), start_override = ?config.start_override(), "session opened");
        Ok(Self {
            dir,
            store,
            config,
            now,
            planner,
        })
    }

    pub fn now(&self) -> NaiveDateTime {
        self.now
    }

    pub fn store(&self) -> &StateStore {
        &self.store
    }

    /// Persist the state, and the start override when it changed.
    pub fn save(&mut self) -> Result<(), CoreError> {
        self.store.save(self.planner.state())?;
        if self.config.start_override() != self.planner.start_override() {
            self.config.set_start_override(self.planner.start_override());
            self.config.save_to(&self.dir)?;
        }
        Ok(())
    }
}
