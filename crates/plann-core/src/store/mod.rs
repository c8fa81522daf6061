//! SQLite-backed [`ActiveTripStore`].
//!
//! Each call opens the database on tokio's blocking pool, runs one query and
//! closes it again, so the store is cheap to share and never holds a
//! connection across an await point.
//!
//! ```rust,no_run
//! use plann_core::{models::TripId, services::ActiveTripStore, ActiveTripStoreBuilder};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = ActiveTripStoreBuilder::new()
//!     .with_database_path(Some("plann.db"))
//!     .build()
//!     .await?;
//!
//! store.save(&TripId::new("b7d1")).await?;
//! assert_eq!(store.get().await?, Some(TripId::new("b7d1")));
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::task;

use crate::{db::Database, error::StorageError, models::TripId, services::ActiveTripStore};

pub mod builder;

pub use builder::ActiveTripStoreBuilder;

/// Active trip pointer persisted in a SQLite file.
#[derive(Debug, Clone)]
pub struct SqliteTripStore {
    db_path: PathBuf,
}

impl SqliteTripStore {
    pub(crate) fn new(db_path: PathBuf) -> Self {
        Self { db_path }
    }

    pub fn database_path(&self) -> &Path {
        &self.db_path
    }

    async fn with_database<T, F>(&self, f: F) -> Result<T, StorageError>
    where
        T: Send + 'static,
        F: FnOnce(&Database) -> Result<T, StorageError> + Send + 'static,
    {
        let db_path = self.db_path.clone();
        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            f(&db)
        })
        .await
        .map_err(|e| StorageError::Task(format!("Task join error: {e}")))?
    }
}

#[async_trait]
impl ActiveTripStore for SqliteTripStore {
    async fn save(&self, id: &TripId) -> Result<(), StorageError> {
        let id = id.clone();
        log::info!("Saving active trip {id}");
        self.with_database(move |db| db.save_active_trip(&id)).await
    }

    async fn get(&self) -> Result<Option<TripId>, StorageError> {
        self.with_database(Database::get_active_trip).await
    }

    async fn remove(&self) -> Result<(), StorageError> {
        let removed = self.with_database(Database::clear_active_trip).await?;
        log::info!("Removed active trip pointer (present: {removed})");
        Ok(())
    }
}
