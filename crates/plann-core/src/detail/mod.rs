//! Controller for an existing trip.
//!
//! Covers the detail screen of a followed trip: loading the record and its
//! header text, editing destination and dates, confirming attendance for an
//! invited participant, and forgetting the trip locally.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::{
    display::TripWhen,
    error::{Result, StorageError, TripError, ValidationError},
    flow::{Answer, Navigation},
    models::{
        CalendarDay, CalendarView, DateRange, ParticipantConfirmation, TripId, TripRecord,
        TripUpdate,
    },
    services::{ActiveTripStore, RemoteParticipantService, RemoteTripService},
    validate::is_valid_email,
};


/// Overlay shown above the trip detail view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DetailOverlay {
    #[default]
    None,
    UpdateTrip,
    Calendar,
    ConfirmAttendance,
}

/// Content tab of the detail view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DetailTab {
    #[default]
    Activities,
    Details,
}

/// Complete, serializable state of the detail controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailState {
    pub trip_id: TripId,
    /// Set when the view was opened from an invitation
    pub participant_id: Option<String>,
    pub trip: Option<TripRecord>,
    /// Header text, e.g. `Paris from 5 to 10 of November.`
    pub when: String,
    pub overlay: DetailOverlay,
    pub tab: DetailTab,
    /// Editable copy used by the update overlay
    pub destination: String,
    pub range: DateRange,
    pub guest_name: String,
    pub guest_email: String,
    pub loading_trip: bool,
    pub updating_trip: bool,
    pub confirming_attendance: bool,
    pub awaiting_removal_confirmation: bool,
}

impl DetailState {
    fn new(trip_id: TripId, participant_id: Option<String>) -> Self {
        let overlay = if participant_id.is_some() {
            DetailOverlay::ConfirmAttendance
        } else {
            DetailOverlay::None
        };
        Self {
            trip_id,
            participant_id,
            trip: None,
            when: String::new(),
            overlay,
            tab: DetailTab::default(),
            destination: String::new(),
            range: DateRange::empty(),
            guest_name: String::new(),
            guest_email: String::new(),
            loading_trip: true,
            updating_trip: false,
            confirming_attendance: false,
            awaiting_removal_confirmation: false,
        }
    }

    fn apply_record(&mut self, trip: TripRecord) -> &TripRecord {
        self.when = TripWhen(&trip).to_string();
        self.destination = trip.destination.clone();
        self.range = trip.range();
        self.trip.insert(trip)
    }
}

/// Outcome of a confirmed attendance or removal.
#[derive(Debug)]
pub struct Completed {
    pub navigation: Option<Navigation>,
    /// Set when the pointer could not be written
    pub warning: Option<StorageError>,
}

/// Result of answering the removal confirmation.
#[derive(Debug)]
pub enum Removal {
    Cancelled,
    Removed(Completed),
}

/// State machine for the detail view of one trip.
pub struct TripDetail<R, P, S> {
    state: DetailState,
    trips: R,
    participants: P,
    store: S,
}

impl<R, P, S> TripDetail<R, P, S>
where
    R: RemoteTripService,
    P: RemoteParticipantService,
    S: ActiveTripStore,
{
    /// Opens the detail view of `trip_id`.
    ///
    /// With a participant identifier attached, the attendance overlay is
    /// entered right away.
    pub fn new(
        trip_id: TripId,
        participant_id: Option<String>,
        trips: R,
        participants: P,
        store: S,
    ) -> Self {
        Self::from_state(DetailState::new(trip_id, participant_id), trips, participants, store)
    }

    /// Restores a controller from a previously captured state.
    pub fn from_state(state: DetailState, trips: R, participants: P, store: S) -> Self {
        Self {
            state,
            trips,
            participants,
            store,
        }
    }

    pub fn state(&self) -> &DetailState {
        &self.state
    }

    pub fn trip(&self) -> Option<&TripRecord> {
        self.state.trip.as_ref()
    }

    pub fn when(&self) -> &str {
        &self.state.when
    }

    /// Fetches the trip and derives the header text.
    pub async fn load(&mut self) -> Result<&TripRecord> {
        self.state.loading_trip = true;
        let fetched = self.trips.get_by_id(&self.state.trip_id).await;
        self.state.loading_trip = false;

        let trip = match fetched {
            Ok(trip) => trip,
            Err(e) => {
                warn!("Trip {} could not be loaded: {e}", self.state.trip_id);
                return Err(e.into());
            }
        };
        debug!("Loaded trip {}: {}", trip.id, TripWhen(&trip));
        Ok(self.state.apply_record(trip))
    }

    pub fn select_tab(&mut self, tab: DetailTab) {
        self.state.tab = tab;
    }

    /// Opens the update overlay seeded with the current destination and dates.
    pub fn open_update(&mut self) -> Result<()> {
        self.ensure_loaded("update the trip")?;
        match self.state.overlay {
            DetailOverlay::None => {
                if let Some(trip) = &self.state.trip {
                    self.state.destination = trip.destination.clone();
                    self.state.range = trip.range();
                }
                self.state.overlay = DetailOverlay::UpdateTrip;
                Ok(())
            }
            DetailOverlay::UpdateTrip => Ok(()),
            other => Err(TripError::invalid_transition("update the trip", other)),
        }
    }

    /// Opens the calendar from the update overlay.
    pub fn open_calendar(&mut self) -> Result<()> {
        self.ensure_overlay(DetailOverlay::UpdateTrip, "open the calendar")?;
        self.state.overlay = DetailOverlay::Calendar;
        Ok(())
    }

    /// Accepts the selected dates and returns to the update overlay.
    pub fn confirm_dates(&mut self) -> Result<()> {
        self.ensure_overlay(DetailOverlay::Calendar, "confirm the dates")?;
        self.state.overlay = DetailOverlay::UpdateTrip;
        Ok(())
    }

    /// Dismisses the current overlay. Attendance must be confirmed instead.
    pub fn close_overlay(&mut self) -> Result<()> {
        if self.state.overlay == DetailOverlay::ConfirmAttendance {
            return Err(TripError::invalid_transition(
                "dismiss the attendance confirmation",
                self.state.overlay,
            ));
        }
        self.state.overlay = DetailOverlay::None;
        self.state.awaiting_removal_confirmation = false;
        Ok(())
    }

    pub fn set_destination(&mut self, destination: impl Into<String>) -> Result<()> {
        self.ensure_overlay(DetailOverlay::UpdateTrip, "edit the destination")?;
        self.state.destination = destination.into();
        Ok(())
    }

    pub fn select_day(&mut self, day: CalendarDay) -> Result<()> {
        self.ensure_overlay(DetailOverlay::Calendar, "select a day")?;
        self.state.range = self.state.range.select(day);
        Ok(())
    }

    pub fn calendar_view(&self, min_date: CalendarDay) -> CalendarView {
        CalendarView::new(&self.state.range, min_date)
    }

    /// Sends the edited destination and dates.
    ///
    /// Nothing is sent unless the destination is non-empty and both dates are
    /// selected. On success the trip is re-fetched and the overlay closes; if
    /// the re-fetch fails the cached record is patched with what was sent.
    pub async fn update_trip(&mut self) -> Result<()> {
        if self.state.updating_trip {
            return Err(TripError::Busy {
                action: "updating trip",
            });
        }
        self.ensure_overlay(DetailOverlay::UpdateTrip, "update the trip")?;
        if self.state.destination.trim().is_empty() {
            return Err(ValidationError::EmptyDestination.into());
        }
        let (start, end) = self.state.range.bounds().ok_or(ValidationError::MissingDates)?;

        let fields = TripUpdate::new(self.state.destination.clone(), start, end)?;
        self.state.updating_trip = true;
        info!("Updating trip {}", self.state.trip_id);
        if let Err(e) = self.trips.update(&self.state.trip_id, &fields).await {
            warn!("Trip {} update failed: {e}", self.state.trip_id);
            self.state.updating_trip = false;
            return Err(e.into());
        }

        match self.trips.get_by_id(&self.state.trip_id).await {
            Ok(trip) => {
                self.state.apply_record(trip);
            }
            Err(e) => {
                warn!("Trip {} updated but could not be re-fetched: {e}", self.state.trip_id);
                if let Some(mut trip) = self.state.trip.take() {
                    trip.destination = fields.destination;
                    trip.starts_at = start;
                    trip.ends_at = end;
                    self.state.apply_record(trip);
                }
            }
        }

        self.state.overlay = DetailOverlay::None;
        self.state.updating_trip = false;
        Ok(())
    }

    pub fn set_guest_name(&mut self, name: impl Into<String>) -> Result<()> {
        self.ensure_overlay(DetailOverlay::ConfirmAttendance, "enter a name")?;
        self.state.guest_name = name.into();
        Ok(())
    }

    pub fn set_guest_email(&mut self, email: impl Into<String>) -> Result<()> {
        self.ensure_overlay(DetailOverlay::ConfirmAttendance, "enter an email")?;
        self.state.guest_email = email.into();
        Ok(())
    }

    /// Confirms the invited participant's attendance.
    ///
    /// Requires a non-empty name and a valid email. On success this device
    /// starts following the trip and the overlay closes; on failure the
    /// overlay stays open for a retry.
    pub async fn confirm_attendance(&mut self) -> Result<Completed> {
        if self.state.confirming_attendance {
            return Err(TripError::Busy {
                action: "confirming attendance",
            });
        }
        self.ensure_overlay(DetailOverlay::ConfirmAttendance, "confirm attendance")?;
        let participant_id = self
            .state
            .participant_id
            .clone()
            .ok_or(ValidationError::MissingParticipant)?;

        let name = self.state.guest_name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        let email = self.state.guest_email.trim();
        if !is_valid_email(email) {
            return Err(ValidationError::InvalidEmail {
                email: email.to_string(),
            }
            .into());
        }

        let confirmation = ParticipantConfirmation {
            participant_id,
            name: name.to_string(),
            email: email.to_string(),
        };
        self.state.confirming_attendance = true;
        info!("Confirming participant {}", confirmation.participant_id);
        if let Err(e) = self.participants.confirm(&confirmation).await {
            warn!("Attendance confirmation failed: {e}");
            self.state.confirming_attendance = false;
            return Err(e.into());
        }

        let warning = self.store.save(&self.state.trip_id).await.err();
        if let Some(e) = &warning {
            warn!("Attendance confirmed but trip not saved as active: {e}");
        }
        self.state.overlay = DetailOverlay::None;
        self.state.confirming_attendance = false;
        Ok(Completed {
            navigation: None,
            warning,
        })
    }

    /// Asks to stop following this trip. Answer with [`Self::confirm_removal`].
    pub fn request_removal(&mut self) -> Result<()> {
        if self.state.overlay == DetailOverlay::ConfirmAttendance {
            return Err(TripError::invalid_transition("remove the trip", self.state.overlay));
        }
        self.state.awaiting_removal_confirmation = true;
        Ok(())
    }

    /// Answers the removal confirmation.
    ///
    /// Only the local pointer is cleared; the remote trip is untouched. A
    /// failed clear is reported as a warning and navigation still happens.
    pub async fn confirm_removal(&mut self, answer: Answer) -> Result<Removal> {
        if !self.state.awaiting_removal_confirmation {
            return Err(TripError::invalid_transition("confirm removal", self.state.overlay));
        }
        self.state.awaiting_removal_confirmation = false;
        if answer == Answer::No {
            return Ok(Removal::Cancelled);
        }

        let warning = self.store.remove().await.err();
        if let Some(e) = &warning {
            warn!("Active trip pointer could not be cleared: {e}");
        }
        info!("Stopped following trip {}", self.state.trip_id);
        self.state.overlay = DetailOverlay::None;
        Ok(Removal::Removed(Completed {
            navigation: Some(Navigation::Wizard),
            warning,
        }))
    }

    fn ensure_loaded(&self, action: &'static str) -> Result<()> {
        if self.state.trip.is_none() || self.state.loading_trip {
            return Err(TripError::InvalidTransition {
                action,
                state: "loading trip".to_string(),
            });
        }
        Ok(())
    }

    fn ensure_overlay(&self, overlay: DetailOverlay, action: &'static str) -> Result<()> {
        if self.state.overlay == overlay {
            Ok(())
        } else {
            Err(TripError::invalid_transition(action, self.state.overlay))
        }
    }
}
