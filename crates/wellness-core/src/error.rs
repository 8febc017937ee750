//! Error types for wellness-core.
//!
//! All errors are non-fatal from the host's point of view: the worst case
//! for any operation is "it did not take effect", reported through the
//! returned `Result`.

use std::path::PathBuf;
use thiserror::Error;
use uuid::Uuid;

/// Top-level error type for wellness-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Record store errors (write path; reads fail open)
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Rejected user input, reported for display and never persisted
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Reminder scheduling errors
    #[error("Scheduling error: {0}")]
    Schedule(#[from] ScheduleError),

    /// A mutation addressed an identifier that no longer exists
    #[error("{what} not found: {id}")]
    NotFound { what: &'static str, id: Uuid },
}

/// Record-store errors.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Failed to open the backing database
    #[error("Failed to open record store at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Database is locked by another connection
    #[error("Record store is locked")]
    Locked,

    /// Failed to serialize a collection before writing it
    #[error("Failed to serialize collection '{key}': {source}")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// IO errors (data directory creation)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Rejected user input.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Habit name is required")]
    NameRequired,

    #[error("Habit name too short: {len} characters (minimum 2)")]
    NameTooShort { len: usize },

    #[error("Habit name too long: {len} characters (maximum 50)")]
    NameTooLong { len: usize },

    #[error("Target count must be a positive number")]
    TargetNotPositive,

    #[error("Note too long: {len} characters (maximum 200)")]
    NoteTooLong { len: usize },

    #[error("PIN must be exactly 4 digits")]
    PinFormat,

    #[error("A PIN is already set")]
    PinAlreadySet,

    #[error("Unsupported reminder interval: {minutes} minutes")]
    IntervalNotAllowed { minutes: u32 },
}

/// Reminder scheduling errors. Never fatal; the schedule call is a no-op.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("Invalid reminder interval: {minutes} minutes")]
    InvalidInterval { minutes: u32 },
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(err, _msg) => {
                if err.code == rusqlite::ErrorCode::DatabaseLocked {
                    StoreError::Locked
                } else {
                    StoreError::QueryFailed(err.to_string())
                }
            }
            _ => StoreError::QueryFailed(err.to_string()),
        }
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
