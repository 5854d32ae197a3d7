use log::{error, warn};
use rusqlite::ErrorCode;
use thiserror::Error;

/// Custom Result type for this crate.
pub type Result<T> = std::result::Result<T, SlangError>;

/// Enum representing all possible errors in the british_days library.
#[derive(Error, Debug)]
pub enum SlangError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Data directory not found or could not be determined")]
    DataDirNotFound,

    #[error("Failed to parse data: {0}")]
    ParseError(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Internal error: {0}")]
    Internal(String), // For unexpected situations
}

impl SlangError {
    /// True for SQLite busy/locked conditions that are worth retrying later.
    pub fn is_transient(&self) -> bool {
        match self {
            SlangError::Database(rusqlite::Error::SqliteFailure(e, _)) => matches!(
                e.code,
                ErrorCode::DatabaseBusy | ErrorCode::DatabaseLocked
            ),
            _ => false,
        }
    }

    /// True when a write was rejected by a UNIQUE constraint.
    pub fn is_conflict(&self) -> bool {
        match self {
            SlangError::Database(rusqlite::Error::SqliteFailure(e, _)) => {
                e.code == ErrorCode::ConstraintViolation
            }
            _ => false,
        }
    }
}

/// Result kind for store writes.
///
/// Expected conditions (`Conflict`, `NotFound`) are kept apart from storage
/// failures so callers can tell "try another term" from "needs attention".
#[derive(Debug)]
pub enum StoreOutcome<T> {
    Ok(T),
    /// A term with the same name (ignoring case) already exists.
    Conflict,
    /// No row with the given id.
    NotFound,
    /// The database was busy or locked.
    Transient(SlangError),
    Fatal(SlangError),
}

impl<T> StoreOutcome<T> {
    /// Sorts a storage error into `Conflict`, `Transient` or `Fatal`, logging
    /// the latter two.
    pub(crate) fn from_error(context: &str, err: SlangError) -> Self {
        if err.is_conflict() {
            StoreOutcome::Conflict
        } else if err.is_transient() {
            warn!("{}: database busy: {}", context, err);
            StoreOutcome::Transient(err)
        } else {
            error!("{}: {}", context, err);
            StoreOutcome::Fatal(err)
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, StoreOutcome::Ok(_))
    }

    /// The success value, discarding the failure kind.
    pub fn ok(self) -> Option<T> {
        match self {
            StoreOutcome::Ok(v) => Some(v),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> StoreOutcome<U> {
        match self {
            StoreOutcome::Ok(v) => StoreOutcome::Ok(f(v)),
            StoreOutcome::Conflict => StoreOutcome::Conflict,
            StoreOutcome::NotFound => StoreOutcome::NotFound,
            StoreOutcome::Transient(e) => StoreOutcome::Transient(e),
            StoreOutcome::Fatal(e) => StoreOutcome::Fatal(e),
        }
    }

    /// Short label used in log lines and CLI output.
    pub fn kind(&self) -> &'static str {
        match self {
            StoreOutcome::Ok(_) => "ok",
            StoreOutcome::Conflict => "conflict",
            StoreOutcome::NotFound => "not found",
            StoreOutcome::Transient(_) => "transient error",
            StoreOutcome::Fatal(_) => "fatal error",
        }
    }
}
