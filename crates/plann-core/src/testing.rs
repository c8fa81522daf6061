//! In-memory collaborators for unit tests.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc, Mutex,
};

use async_trait::async_trait;

use crate::{
    error::{RemoteError, StorageError},
    models::{NewTrip, ParticipantConfirmation, TripId, TripRecord, TripUpdate},
    services::{ActiveTripStore, RemoteParticipantService, RemoteTripService},
};

/// Remote trip service keeping trips in a vector and recording requests.
#[derive(Default)]
pub struct FakeTrips {
    pub trips: Mutex<Vec<TripRecord>>,
    pub created: Mutex<Vec<NewTrip>>,
    pub updates: Mutex<Vec<(TripId, TripUpdate)>>,
    pub fetches: Mutex<u32>,
    pub fail_create: AtomicBool,
    pub fail_get: AtomicBool,
    pub fail_update: AtomicBool,
}

impl FakeTrips {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn with_trip(trip: TripRecord) -> Arc<Self> {
        let fake = Self::default();
        fake.trips.lock().unwrap().push(trip);
        Arc::new(fake)
    }

    fn network_error() -> RemoteError {
        RemoteError::Network {
            message: "connection refused".to_string(),
        }
    }
}

#[async_trait]
impl RemoteTripService for FakeTrips {
    async fn create(&self, trip: &NewTrip) -> Result<TripId, RemoteError> {
        if self.fail_create.load(Ordering::SeqCst) {
            return Err(Self::network_error());
        }
        let mut created = self.created.lock().unwrap();
        created.push(trip.clone());
        Ok(TripId::new(format!("trip-{}", created.len())))
    }

    async fn get_by_id(&self, id: &TripId) -> Result<TripRecord, RemoteError> {
        *self.fetches.lock().unwrap() += 1;
        if self.fail_get.load(Ordering::SeqCst) {
            return Err(Self::network_error());
        }
        self.trips
            .lock()
            .unwrap()
            .iter()
            .find(|t| &t.id == id)
            .cloned()
            .ok_or_else(|| RemoteError::NotFound { id: id.to_string() })
    }

    async fn update(&self, id: &TripId, fields: &TripUpdate) -> Result<(), RemoteError> {
        if self.fail_update.load(Ordering::SeqCst) {
            return Err(Self::network_error());
        }
        self.updates.lock().unwrap().push((id.clone(), fields.clone()));
        let mut trips = self.trips.lock().unwrap();
        let trip = trips
            .iter_mut()
            .find(|t| &t.id == id)
            .ok_or_else(|| RemoteError::NotFound { id: id.to_string() })?;
        trip.destination = fields.destination.clone();
        trip.starts_at = fields.starts_at.to_zoned(jiff::tz::TimeZone::UTC).date().into();
        trip.ends_at = fields.ends_at.to_zoned(jiff::tz::TimeZone::UTC).date().into();
        Ok(())
    }
}

/// Participant service recording confirmations.
#[derive(Default)]
pub struct FakeParticipants {
    pub confirmed: Mutex<Vec<ParticipantConfirmation>>,
    pub fail: AtomicBool,
}

impl FakeParticipants {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }
}

#[async_trait]
impl RemoteParticipantService for FakeParticipants {
    async fn confirm(&self, confirmation: &ParticipantConfirmation) -> Result<(), RemoteError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(RemoteError::Rejected {
                status: 400,
                message: "participant not found".to_string(),
            });
        }
        self.confirmed.lock().unwrap().push(confirmation.clone());
        Ok(())
    }
}

/// Pointer slot in memory, with switchable read and write failures.
#[derive(Default)]
pub struct FakeStore {
    pub pointer: Mutex<Option<TripId>>,
    pub fail_reads: AtomicBool,
    pub fail_writes: AtomicBool,
}

impl FakeStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn holding(id: &str) -> Arc<Self> {
        let store = Self::default();
        *store.pointer.lock().unwrap() = Some(TripId::new(id));
        Arc::new(store)
    }

    pub fn current(&self) -> Option<TripId> {
        self.pointer.lock().unwrap().clone()
    }
}

#[async_trait]
impl ActiveTripStore for FakeStore {
    async fn save(&self, id: &TripId) -> Result<(), StorageError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::StorageFull);
        }
        *self.pointer.lock().unwrap() = Some(id.clone());
        Ok(())
    }

    async fn get(&self) -> Result<Option<TripId>, StorageError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StorageError::Task("disk unavailable".to_string()));
        }
        Ok(self.current())
    }

    async fn remove(&self) -> Result<(), StorageError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Task("disk unavailable".to_string()));
        }
        *self.pointer.lock().unwrap() = None;
        Ok(())
    }
}

/// A trip record from ISO dates.
pub fn trip(id: &str, destination: &str, start: &str, end: &str) -> TripRecord {
    TripRecord {
        id: TripId::new(id),
        destination: destination.to_string(),
        starts_at: start.parse().expect("valid test date"),
        ends_at: end.parse().expect("valid test date"),
        is_confirmed: false,
    }
}
