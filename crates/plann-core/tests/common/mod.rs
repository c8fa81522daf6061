#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use jiff::tz::TimeZone;
use plann_core::{
    ActiveTripStoreBuilder, NewTrip, ParticipantConfirmation, RemoteError,
    RemoteParticipantService, RemoteTripService, SqliteTripStore, TripId, TripRecord, TripUpdate,
};
use tempfile::TempDir;

/// Helper function to create a store backed by a temporary database
pub async fn create_test_store() -> (TempDir, SqliteTripStore) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let store = ActiveTripStoreBuilder::new()
        .with_database_path(Some(&db_path))
        .build()
        .await
        .expect("Failed to create store");
    (temp_dir, store)
}

/// Remote services backed by a vector, standing in for the HTTP API.
#[derive(Default)]
pub struct InMemoryRemote {
    pub trips: Mutex<Vec<TripRecord>>,
    pub confirmations: Mutex<Vec<ParticipantConfirmation>>,
}

impl InMemoryRemote {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }
}

#[async_trait]
impl RemoteTripService for InMemoryRemote {
    async fn create(&self, trip: &NewTrip) -> Result<TripId, RemoteError> {
        let mut trips = self.trips.lock().unwrap();
        let id = TripId::new(format!("remote-{}", trips.len() + 1));
        trips.push(TripRecord {
            id: id.clone(),
            destination: trip.destination.clone(),
            starts_at: trip.starts_at.to_zoned(TimeZone::UTC).date().into(),
            ends_at: trip.ends_at.to_zoned(TimeZone::UTC).date().into(),
            is_confirmed: false,
        });
        Ok(id)
    }

    async fn get_by_id(&self, id: &TripId) -> Result<TripRecord, RemoteError> {
        self.trips
            .lock()
            .unwrap()
            .iter()
            .find(|t| &t.id == id)
            .cloned()
            .ok_or_else(|| RemoteError::NotFound { id: id.to_string() })
    }

    async fn update(&self, id: &TripId, fields: &TripUpdate) -> Result<(), RemoteError> {
        let mut trips = self.trips.lock().unwrap();
        let trip = trips
            .iter_mut()
            .find(|t| &t.id == id)
            .ok_or_else(|| RemoteError::NotFound { id: id.to_string() })?;
        trip.destination = fields.destination.clone();
        trip.starts_at = fields.starts_at.to_zoned(TimeZone::UTC).date().into();
        trip.ends_at = fields.ends_at.to_zoned(TimeZone::UTC).date().into();
        Ok(())
    }
}

#[async_trait]
impl RemoteParticipantService for InMemoryRemote {
    async fn confirm(&self, confirmation: &ParticipantConfirmation) -> Result<(), RemoteError> {
        self.confirmations.lock().unwrap().push(confirmation.clone());
        Ok(())
    }
}
