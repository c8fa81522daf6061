//! Builder for creating and configuring SqliteTripStore instances.

use std::path::{Path, PathBuf};

use tokio::task;

use super::SqliteTripStore;
use crate::{db::Database, error::StorageError};

/// Builder for creating and configuring SqliteTripStore instances.
#[derive(Debug, Clone)]
pub struct ActiveTripStoreBuilder {
    database_path: Option<PathBuf>,
}

impl ActiveTripStoreBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            database_path: None,
        }
    }

    /// Sets a custom database file path.
    ///
    /// If not specified, uses XDG Base Directory specification:
    /// `$XDG_DATA_HOME/plann/plann.db` or `~/.local/share/plann/plann.db`
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.database_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Builds the configured store, creating the schema if needed.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::FileSystem` if the parent directory cannot be
    /// created, `StorageError::Database` if schema initialization fails
    pub async fn build(self) -> Result<SqliteTripStore, StorageError> {
        let db_path = if let Some(path) = self.database_path {
            path
        } else {
            Self::default_database_path()?
        };

        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| StorageError::FileSystem {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let db_path_clone = db_path.clone();
        task::spawn_blocking(move || Database::new(&db_path_clone).map(drop))
            .await
            .map_err(|e| StorageError::Task(format!("Task join error: {e}")))??;

        log::debug!("Active trip store ready at {}", db_path.display());
        Ok(SqliteTripStore::new(db_path))
    }

    /// Returns the default database path following XDG Base Directory
    /// specification.
    fn default_database_path() -> Result<PathBuf, StorageError> {
        xdg::BaseDirectories::with_prefix("plann")
            .place_data_file("plann.db")
            .map_err(|e| StorageError::XdgDirectory(e.to_string()))
    }
}

impl Default for ActiveTripStoreBuilder {
    fn default() -> Self {
        Self::new()
    }
}
