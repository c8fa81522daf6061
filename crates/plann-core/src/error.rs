//! Error types for the trip planning library.
//!
//! Every failure is recoverable. Validation failures are reported before any
//! collaborator is called, remote failures roll the action back to its
//! pre-attempt state, and storage failures that follow a successful remote
//! call are surfaced as warnings on the outcome instead of as errors.

use std::path::PathBuf;

use thiserror::Error;

/// Comprehensive error type for all trip operations.
#[derive(Error, Debug)]
pub enum TripError {
    /// Bad or missing user input; nothing was sent anywhere.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// A remote create/update/confirm/fetch call failed.
    #[error(transparent)]
    Remote(#[from] RemoteError),
    /// Reading or writing the active trip pointer failed.
    #[error(transparent)]
    Storage(#[from] StorageError),
    /// The event is not meaningful in the current state.
    #[error("Cannot {action} while {state}")]
    InvalidTransition {
        action: &'static str,
        state: String,
    },
    /// The same asynchronous action is already in flight.
    #[error("Already busy: {action}")]
    Busy { action: &'static str },
}

/// Input validation failures, always recovered locally.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Destination must have at least {min} characters")]
    DestinationTooShort { min: usize },
    #[error("Destination cannot be empty")]
    EmptyDestination,
    #[error("Select both a start and an end date")]
    MissingDates,
    #[error("Date {day} cannot be sent to the trip service")]
    DateOutOfRange { day: String },
    #[error("Invalid email address: {email}")]
    InvalidEmail { email: String },
    #[error("Guest {email} is already on the list")]
    DuplicateEmail { email: String },
    #[error("Name cannot be empty")]
    EmptyName,
    #[error("No participant identifier attached to this trip")]
    MissingParticipant,
}

/// Failures reported by the remote trip and participant services.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RemoteError {
    #[error("Trip with ID {id} not found")]
    NotFound { id: String },
    #[error("Network error: {message}")]
    Network { message: String },
    #[error("Remote service rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },
}

/// Failures of the local active trip pointer.
#[derive(Error, Debug)]
pub enum StorageError {
    /// No space left to persist the pointer
    #[error("Storage is full")]
    StorageFull,
    /// Database connection or query errors
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Blocking task could not be joined
    #[error("Storage task failed: {0}")]
    Task(String),
}

/// Builder for creating database errors with optional context.
pub struct DatabaseErrorBuilder {
    message: String,
}

impl DatabaseErrorBuilder {
    /// Create a new database error builder with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Build the error with the given source.
    ///
    /// A full database is reported as [`StorageError::StorageFull`] so callers
    /// can tell the user something actionable.
    pub fn with_source(self, source: rusqlite::Error) -> StorageError {
        if source.sqlite_error_code() == Some(rusqlite::ErrorCode::DiskFull) {
            return StorageError::StorageFull;
        }
        StorageError::Database {
            message: self.message,
            source,
        }
    }
}

impl StorageError {
    /// Creates a builder for database errors.
    pub fn database(message: impl Into<String>) -> DatabaseErrorBuilder {
        DatabaseErrorBuilder::new(message)
    }
}

impl TripError {
    /// Creates an invalid transition error for `action` in `state`.
    pub fn invalid_transition(action: &'static str, state: impl std::fmt::Debug) -> Self {
        Self::InvalidTransition {
            action,
            state: format!("{state:?}"),
        }
    }
}

/// Specialized extension trait for database-related Results.
pub trait DatabaseResultExt<T> {
    /// Map database errors with a message.
    fn db_context(self, message: &str) -> std::result::Result<T, StorageError>;
}

impl<T> DatabaseResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn db_context(self, message: &str) -> std::result::Result<T, StorageError> {
        self.map_err(|e| StorageError::database(message).with_source(e))
    }
}

/// Result type alias for trip operations
pub type Result<T> = std::result::Result<T, TripError>;
