mod config;
mod state_store;

pub use config::{Config, LoggingConfig, SequencerConfig};
pub use state_store::{StateStore, SAMPLE_EVENT_TITLE, STATE_FILE_NAME};

use std::path::PathBuf;

use crate::error::StorageError;

/// Overrides the data directory outright.
pub const DATA_DIR_ENV: &str = "TIMEWISE_DATA_DIR";

/// Returns the data directory, creating it when missing.
///
/// `TIMEWISE_DATA_DIR` wins when set. Otherwise `~/.config/timewise`, or
/// `~/.config/timewise-dev` with `TIMEWISE_ENV=dev`.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, StorageError> {
    let dir = match std::env::var_os(DATA_DIR_ENV) {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("TIMEWISE_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("timewise-dev")
            } else {
                base_dir.join("timewise")
            }
        }
    };

    std::fs::create_dir_all(&dir).map_err(|source| StorageError::DataDir {
        path: dir.clone(),
        source,
    })?;
    Ok(dir)
}
