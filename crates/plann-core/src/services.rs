//! Collaborator interfaces consumed by the wizard and detail controller.
//!
//! Transport and storage encoding are the host's concern. The core only
//! talks to these traits, which keeps the state machines testable with
//! in-memory fakes.

use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    error::{RemoteError, StorageError},
    models::{CalendarView, NewTrip, ParticipantConfirmation, TripId, TripRecord, TripUpdate},
};

/// Remote trip service owning [`TripRecord`]s.
#[async_trait]
pub trait RemoteTripService: Send + Sync {
    /// Creates a trip and returns the id assigned by the service.
    async fn create(&self, trip: &NewTrip) -> Result<TripId, RemoteError>;

    /// Fetches a trip by id.
    ///
    /// # Errors
    ///
    /// `RemoteError::NotFound` when no such trip exists.
    async fn get_by_id(&self, id: &TripId) -> Result<TripRecord, RemoteError>;

    /// Replaces destination and dates of an existing trip.
    async fn update(&self, id: &TripId, fields: &TripUpdate) -> Result<(), RemoteError>;
}

/// Remote participant service.
#[async_trait]
pub trait RemoteParticipantService: Send + Sync {
    /// Confirms attendance of an invited participant.
    async fn confirm(&self, confirmation: &ParticipantConfirmation) -> Result<(), RemoteError>;
}

/// Local slot holding the one trip this device follows.
#[async_trait]
pub trait ActiveTripStore: Send + Sync {
    /// Stores `id`, replacing any previous pointer.
    async fn save(&self, id: &TripId) -> Result<(), StorageError>;

    async fn get(&self) -> Result<Option<TripId>, StorageError>;

    /// Clears the pointer. Clearing an empty slot succeeds.
    async fn remove(&self) -> Result<(), StorageError>;
}

#[async_trait]
impl<T: RemoteTripService + ?Sized> RemoteTripService for Arc<T> {
    async fn create(&self, trip: &NewTrip) -> Result<TripId, RemoteError> {
        (**self).create(trip).await
    }

    async fn get_by_id(&self, id: &TripId) -> Result<TripRecord, RemoteError> {
        (**self).get_by_id(id).await
    }

    async fn update(&self, id: &TripId, fields: &TripUpdate) -> Result<(), RemoteError> {
        (**self).update(id, fields).await
    }
}

#[async_trait]
impl<T: RemoteParticipantService + ?Sized> RemoteParticipantService for Arc<T> {
    async fn confirm(&self, confirmation: &ParticipantConfirmation) -> Result<(), RemoteError> {
        (**self).confirm(confirmation).await
    }
}

#[async_trait]
impl<T: ActiveTripStore + ?Sized> ActiveTripStore for Arc<T> {
    async fn save(&self, id: &TripId) -> Result<(), StorageError> {
        (**self).save(id).await
    }

    async fn get(&self) -> Result<Option<TripId>, StorageError> {
        (**self).get().await
    }

    async fn remove(&self) -> Result<(), StorageError> {
        (**self).remove().await
    }
}

/// Rendering side of the calendar: receives marks and the minimum day.
pub trait CalendarWidget {
    fn show(&mut self, view: &CalendarView);
}
