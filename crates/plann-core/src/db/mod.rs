//! SQLite persistence for the active trip pointer.
//!
//! This module owns the connection and schema. The async [`ActiveTripStore`]
//! implementation lives in [`crate::store`] and drives these blocking calls
//! on tokio's blocking pool.
//!
//! [`ActiveTripStore`]: crate::services::ActiveTripStore

use std::path::Path;

use rusqlite::Connection;

use crate::error::{DatabaseResultExt, StorageError};

pub mod migrations;
pub mod pointer_queries;

/// Database connection and operations handler.
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Creates a new database connection and initializes the schema.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        let connection = Connection::open(path).db_context("Failed to open database connection")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }

    /// Opens a private in-memory database.
    pub fn in_memory() -> Result<Self, StorageError> {
        let connection =
            Connection::open_in_memory().db_context("Failed to open in-memory database")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }
}
