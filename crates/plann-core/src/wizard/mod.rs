//! Trip creation wizard.
//!
//! The wizard is the "no active trip" state of the app. It collects a
//! destination and a date range, then a guest list, and finally creates the
//! trip remotely after an explicit yes/no confirmation.
//!
//! ```text
//!   start() ──▶ active trip found ──▶ Startup::Resume
//!      │
//!      ▼
//! ┌─────────────┐  advance()   ┌───────────┐  advance()   ┌──────────────┐
//! │ TripDetails │ ───────────▶ │ AddGuests │ ───────────▶ │ confirmation │
//! │  Calendar   │ ◀─────────── │  Guests   │ ◀─── No ──── │   pending    │
//! └─────────────┘  go_back()   └───────────┘              └──────┬───────┘
//!                                                               Yes
//!                                               create ─▶ save pointer ─▶ navigate
//! ```
//!
//! Every transition runs to completion on `&mut self`; the busy flags in
//! [`WizardState`] make the in-flight phases visible to the host and reject
//! re-entrant triggers.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::{
    error::{Result, StorageError, TripError},
    flow::{Answer, Navigation},
    models::{CalendarDay, CalendarView, NewTrip, TripDraft, TripId, TripRecord},
    services::{ActiveTripStore, RemoteTripService},
    validate::{can_proceed_from_details, check_details},
};

#[cfg(test)]
mod tests;

/// Form step of the wizard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WizardStep {
    #[default]
    TripDetails,
    AddGuests,
}

/// Overlay shown above the wizard, at most one at a time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WizardOverlay {
    #[default]
    None,
    Calendar,
    Guests,
}

/// Complete, serializable state of the wizard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WizardState {
    pub step: WizardStep,
    pub overlay: WizardOverlay,
    pub draft: TripDraft,
    /// Submission asked for, waiting for the user's yes/no
    pub awaiting_confirmation: bool,
    /// Remote create in flight
    pub creating: bool,
    /// Active trip check still pending; the wizard must not be shown yet
    pub checking_active_trip: bool,
}

/// Result of the startup check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Startup {
    /// A followed trip exists; skip the wizard and open it.
    Resume(TripRecord),
    /// No usable active trip; show the wizard.
    ShowWizard,
}

/// Result of [`TripWizard::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Moved from trip details to the guest step
    Advanced,
    /// Submission requested; answer with [`TripWizard::confirm_submission`]
    AwaitingConfirmation,
}

/// Result of answering the submission confirmation.
#[derive(Debug)]
pub enum Submission {
    /// The user declined; nothing was sent.
    Cancelled,
    /// The trip exists remotely and the draft has been discarded.
    Created {
        trip_id: TripId,
        navigation: Navigation,
        /// Set when the pointer could not be persisted
        warning: Option<StorageError>,
    },
}

/// The trip creation state machine.
pub struct TripWizard<R, S> {
    state: WizardState,
    remote: R,
    store: S,
}

impl<R, S> TripWizard<R, S>
where
    R: RemoteTripService,
    S: ActiveTripStore,
{
    /// Creates a wizard that still has to run its startup check.
    pub fn new(remote: R, store: S) -> Self {
        Self::from_state(
            WizardState {
                checking_active_trip: true,
                ..WizardState::default()
            },
            remote,
            store,
        )
    }

    /// Restores a wizard from a previously captured state.
    pub fn from_state(state: WizardState, remote: R, store: S) -> Self {
        Self {
            state,
            remote,
            store,
        }
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn draft(&self) -> &TripDraft {
        &self.state.draft
    }

    /// Checks for a followed trip before the wizard is shown.
    ///
    /// A stored pointer whose trip can be fetched resumes straight into it.
    /// A missing pointer, an unreadable store or a failed fetch all fall back
    /// to a fresh wizard at `TripDetails` with no overlay.
    pub async fn start(&mut self) -> Startup {
        self.state.checking_active_trip = true;

        let startup = match self.store.get().await {
            Ok(Some(id)) => match self.remote.get_by_id(&id).await {
                Ok(trip) => {
                    info!("Resuming active trip {id}");
                    Startup::Resume(trip)
                }
                Err(e) => {
                    warn!("Active trip {id} could not be fetched: {e}");
                    Startup::ShowWizard
                }
            },
            Ok(None) => Startup::ShowWizard,
            Err(e) => {
                warn!("Active trip pointer could not be read: {e}");
                Startup::ShowWizard
            }
        };

        self.state = WizardState::default();
        debug!("Startup check finished: {startup:?}");
        startup
    }

    /// Live validity of the details step.
    pub fn can_proceed(&self) -> bool {
        can_proceed_from_details(&self.state.draft.destination, &self.state.draft.range)
    }

    /// Replaces the destination text. Returns the new [`Self::can_proceed`].
    pub fn set_destination(&mut self, destination: impl Into<String>) -> Result<bool> {
        self.ensure_idle("edit the destination")?;
        self.ensure_step(WizardStep::TripDetails, "edit the destination")?;
        self.state.draft.destination = destination.into();
        Ok(self.can_proceed())
    }

    /// Opens an overlay, replacing any other. `WizardOverlay::None` closes.
    ///
    /// The calendar belongs to `TripDetails`, the guest list to `AddGuests`.
    pub fn open_overlay(&mut self, overlay: WizardOverlay) -> Result<()> {
        self.ensure_idle("open an overlay")?;
        match overlay {
            WizardOverlay::None => {}
            WizardOverlay::Calendar => {
                self.ensure_step(WizardStep::TripDetails, "open the calendar")?;
            }
            WizardOverlay::Guests => {
                self.ensure_step(WizardStep::AddGuests, "open the guest list")?;
            }
        }
        debug!("Wizard overlay {:?} -> {overlay:?}", self.state.overlay);
        self.state.overlay = overlay;
        Ok(())
    }

    pub fn close_overlay(&mut self) -> Result<()> {
        self.open_overlay(WizardOverlay::None)
    }

    /// Folds a calendar tap into the draft range. Returns the new
    /// [`Self::can_proceed`].
    pub fn select_day(&mut self, day: CalendarDay) -> Result<bool> {
        self.ensure_idle("select a day")?;
        self.ensure_overlay(WizardOverlay::Calendar, "select a day")?;
        self.state.draft.range = self.state.draft.range.select(day);
        debug!("Draft range is now {:?}", self.state.draft.range);
        Ok(self.can_proceed())
    }

    /// What the calendar widget should draw.
    pub fn calendar_view(&self, min_date: CalendarDay) -> CalendarView {
        CalendarView::new(&self.state.draft.range, min_date)
    }

    /// Adds a guest from the guest overlay.
    ///
    /// # Errors
    ///
    /// Invalid or duplicate emails are reported as validation errors and leave
    /// the list unchanged.
    pub fn add_guest(&mut self, email: &str) -> Result<()> {
        self.ensure_idle("add a guest")?;
        self.ensure_overlay(WizardOverlay::Guests, "add a guest")?;
        self.state.draft.guests = self.state.draft.guests.add(email)?;
        Ok(())
    }

    pub fn remove_guest(&mut self, email: &str) -> Result<()> {
        self.ensure_idle("remove a guest")?;
        self.ensure_overlay(WizardOverlay::Guests, "remove a guest")?;
        self.state.draft.guests = self.state.draft.guests.remove(email);
        Ok(())
    }

    /// Moves forward: details to guests, or from guests asks to submit.
    pub fn advance(&mut self) -> Result<Advance> {
        self.ensure_idle("continue")?;
        match self.state.step {
            WizardStep::TripDetails => {
                check_details(&self.state.draft.destination, &self.state.draft.range)?;
                self.state.step = WizardStep::AddGuests;
                self.state.overlay = WizardOverlay::None;
                debug!("Wizard advanced to AddGuests");
                Ok(Advance::Advanced)
            }
            WizardStep::AddGuests => {
                self.state.overlay = WizardOverlay::None;
                self.state.awaiting_confirmation = true;
                Ok(Advance::AwaitingConfirmation)
            }
        }
    }

    /// Returns to the details step, keeping destination, range and guests.
    pub fn go_back_to_details(&mut self) -> Result<()> {
        self.ensure_idle("change location or dates")?;
        self.ensure_step(WizardStep::AddGuests, "go back to trip details")?;
        self.state.step = WizardStep::TripDetails;
        self.state.overlay = WizardOverlay::None;
        self.state.awaiting_confirmation = false;
        Ok(())
    }

    /// Answers the pending submission confirmation.
    ///
    /// On `Yes` the trip is created remotely; only then is the returned id
    /// stored as the active trip. A failed create leaves the draft and step
    /// untouched so the user can retry. A failed pointer write does not undo
    /// the creation and is returned as a warning.
    pub async fn confirm_submission(&mut self, answer: Answer) -> Result<Submission> {
        if self.state.creating {
            return Err(TripError::Busy {
                action: "creating trip",
            });
        }
        if !self.state.awaiting_confirmation {
            return Err(TripError::invalid_transition(
                "confirm the trip",
                self.state.step,
            ));
        }
        self.state.awaiting_confirmation = false;

        if answer == Answer::No {
            debug!("Trip submission cancelled");
            return Ok(Submission::Cancelled);
        }

        let request = NewTrip::from_draft(&self.state.draft)?;
        check_details(&request.destination, &self.state.draft.range)?;

        self.state.creating = true;
        info!(
            "Creating trip to {} with {} guest(s)",
            request.destination,
            request.emails_to_invite.len()
        );
        let trip_id = match self.remote.create(&request).await {
            Ok(id) => id,
            Err(e) => {
                warn!("Trip creation failed: {e}");
                self.state.creating = false;
                return Err(e.into());
            }
        };

        let warning = match self.store.save(&trip_id).await {
            Ok(()) => None,
            Err(e) => {
                warn!("Trip {trip_id} created but not saved as active: {e}");
                Some(e)
            }
        };

        self.state = WizardState::default();
        Ok(Submission::Created {
            navigation: Navigation::TripDetail {
                trip_id: trip_id.clone(),
            },
            trip_id,
            warning,
        })
    }

    fn ensure_idle(&self, action: &'static str) -> Result<()> {
        if self.state.checking_active_trip {
            return Err(TripError::Busy {
                action: "checking active trip",
            });
        }
        if self.state.creating {
            return Err(TripError::Busy {
                action: "creating trip",
            });
        }
        if self.state.awaiting_confirmation {
            return Err(TripError::InvalidTransition {
                action,
                state: "awaiting confirmation".to_string(),
            });
        }
        Ok(())
    }

    fn ensure_step(&self, step: WizardStep, action: &'static str) -> Result<()> {
        if self.state.step == step {
            Ok(())
        } else {
            Err(TripError::invalid_transition(action, self.state.step))
        }
    }

    fn ensure_overlay(&self, overlay: WizardOverlay, action: &'static str) -> Result<()> {
        if self.state.overlay == overlay {
            Ok(())
        } else {
            Err(TripError::invalid_transition(action, self.state.overlay))
        }
    }
}
