//! Core error types for timemaster-core.
//!
//! Errors never cross a presenter handler: the presenter logs them and keeps
//! the event loop alive. They are still typed so that callers driving the
//! store or the engines directly can react to them.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for timemaster-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Task store errors
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Task runner errors
    #[error("Runner error: {0}")]
    Runner(#[from] RunnerError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Task store errors.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The database file could not be opened or its schema created.
    #[error("Unable to open task store at {path}: {source}")]
    Unavailable {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Statement execution failed
    #[error("Query failed: {0}")]
    Query(#[from] rusqlite::Error),

    /// No task with this id
    #[error("No task with id {0}")]
    NotFound(i64),

    /// Rejected field value
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    /// Stored settings could not be encoded or decoded
    #[error("Settings error: {0}")]
    Settings(String),
}

/// Values rejected at an engine or store boundary.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Time limit must be at least 1 minute, got {0}")]
    TimeLimit(u32),

    #[error("Work length must be at least 1 minute, got {0}")]
    WorkLength(u32),

    #[error("Break length must be at least 1 second, got {0}")]
    BreakLength(u32),
}

/// Task runner errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RunnerError {
    /// Start was requested while the task list has no rows.
    #[error("Task list is empty")]
    EmptyTaskList,
}

impl From<toml::de::Error> for StoreError {
    fn from(err: toml::de::Error) -> Self {
        StoreError::Settings(err.to_string())
    }
}

impl From<toml::ser::Error> for StoreError {
    fn from(err: toml::ser::Error) -> Self {
        StoreError::Settings(err.to_string())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
