//! Active trip pointer queries.

use rusqlite::{params, OptionalExtension};

use crate::{
    error::{DatabaseResultExt, StorageError},
    models::TripId,
};

const UPSERT_POINTER_SQL: &str = "INSERT INTO active_trip (slot, trip_id) VALUES (1, ?1) \
     ON CONFLICT(slot) DO UPDATE SET trip_id = excluded.trip_id";
const SELECT_POINTER_SQL: &str = "SELECT trip_id FROM active_trip WHERE slot = 1";
const DELETE_POINTER_SQL: &str = "DELETE FROM active_trip";

impl super::Database {
    /// Stores `id` as the active trip, replacing any previous pointer.
    pub fn save_active_trip(&self, id: &TripId) -> Result<(), StorageError> {
        self.connection
            .execute(UPSERT_POINTER_SQL, params![id.as_str()])
            .db_context("Failed to save active trip")?;
        Ok(())
    }

    /// Returns the active trip id, if one is stored.
    pub fn get_active_trip(&self) -> Result<Option<TripId>, StorageError> {
        self.connection
            .query_row(SELECT_POINTER_SQL, [], |row| row.get::<_, String>(0))
            .optional()
            .db_context("Failed to read active trip")
            .map(|id| id.map(TripId::from))
    }

    /// Clears the pointer. Returns whether a pointer was present.
    pub fn clear_active_trip(&self) -> Result<bool, StorageError> {
        let removed = self
            .connection
            .execute(DELETE_POINTER_SQL, [])
            .db_context("Failed to remove active trip")?;
        Ok(removed > 0)
    }
}
