//! Core error types for timewise-core.
//!
//! Parsers in this crate return `Option` and never fail; everything that can
//! fail for a reason the user should see (storage, import, invalid edits)
//! goes through the hierarchy below.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for timewise-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Storage-related errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Import of persisted state failed
    #[error("Import failed: {0}")]
    Import(#[from] ImportError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors around the on-disk state file.
#[derive(Error, Debug)]
pub enum StorageError {
    /// The data directory could not be created
    #[error("Failed to prepare data directory {path}: {source}")]
    DataDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The state file exists but could not be read
    #[error("Failed to read state from {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The state file could not be written
    #[error("Failed to write state to {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The state file exists but does not hold valid state
    #[error("State file {path} is corrupt: {reason}")]
    Corrupt { path: PathBuf, reason: String },
}

/// Reasons an imported document is refused.
#[derive(Error, Debug)]
pub enum ImportError {
    /// Not JSON at all
    #[error("Could not parse file: {0}")]
    Unparseable(String),

    /// A required top-level key is missing
    #[error("Invalid file format: missing `{0}`")]
    MissingKey(&'static str),

    /// The keys are present but their contents don't match the state shape
    #[error("Invalid file format: {0}")]
    InvalidShape(String),

    /// An imported event violates `end > start`
    #[error("Event {id} ends at or before its start")]
    InvalidEventRange { id: String },
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown configuration key
    #[error("unknown config key: {0}")]
    UnknownKey(String),
}

/// Validation errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Invalid time range
    #[error("Invalid time range: end ({end}) must be after start ({start})")]
    InvalidTimeRange {
        start: chrono::NaiveDateTime,
        end: chrono::NaiveDateTime,
    },

    /// No event with that id
    #[error("Event not found: {0}")]
    UnknownEvent(String),

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
