//! Tests for the trip creation wizard.

use std::sync::{atomic::Ordering, Arc};

use super::*;
use crate::{
    error::{RemoteError, ValidationError},
    models::DateRange,
    testing::{trip, FakeStore, FakeTrips},
};

type Wizard = TripWizard<Arc<FakeTrips>, Arc<FakeStore>>;

fn day(s: &str) -> CalendarDay {
    s.parse().expect("valid test date")
}

/// A wizard that already finished its startup check.
async fn ready_wizard() -> (Wizard, Arc<FakeTrips>, Arc<FakeStore>) {
    let trips = FakeTrips::new();
    let store = FakeStore::new();
    let mut wizard = TripWizard::new(trips.clone(), store.clone());
    assert_eq!(wizard.start().await, Startup::ShowWizard);
    (wizard, trips, store)
}

/// Fills in "Paris" from the 5th to the 10th and moves to the guest step.
async fn wizard_at_guests() -> (Wizard, Arc<FakeTrips>, Arc<FakeStore>) {
    let (mut wizard, trips, store) = ready_wizard().await;
    wizard.set_destination("Paris").unwrap();
    wizard.open_overlay(WizardOverlay::Calendar).unwrap();
    wizard.select_day(day("2026-11-05")).unwrap();
    wizard.select_day(day("2026-11-10")).unwrap();
    wizard.close_overlay().unwrap();
    assert_eq!(wizard.advance().unwrap(), Advance::Advanced);
    (wizard, trips, store)
}

#[tokio::test]
async fn test_new_wizard_waits_for_startup_check() {
    let mut wizard = TripWizard::new(FakeTrips::new(), FakeStore::new());
    assert!(wizard.state().checking_active_trip);

    let err = wizard.set_destination("Paris").unwrap_err();
    assert!(matches!(err, TripError::Busy { .. }));

    wizard.start().await;
    assert!(!wizard.state().checking_active_trip);
    assert!(wizard.set_destination("Paris").is_ok());
}

#[tokio::test]
async fn test_startup_without_pointer_shows_wizard() {
    let (wizard, trips, _store) = ready_wizard().await;
    assert_eq!(wizard.state().step, WizardStep::TripDetails);
    assert_eq!(*trips.fetches.lock().unwrap(), 0);
}

#[tokio::test]
async fn test_startup_with_pointer_resumes() {
    let record = trip("trip-9", "Lisbon", "2026-11-05", "2026-11-10");
    let mut wizard = TripWizard::new(FakeTrips::with_trip(record.clone()), FakeStore::holding("trip-9"));
    assert_eq!(wizard.start().await, Startup::Resume(record));
}

#[tokio::test]
async fn test_startup_fetch_failure_falls_back_to_details() {
    let trips = FakeTrips::with_trip(trip("trip-9", "Lisbon", "2026-11-05", "2026-11-10"));
    trips.fail_get.store(true, Ordering::SeqCst);
    let mut wizard = TripWizard::new(trips, FakeStore::holding("trip-9"));

    assert_eq!(wizard.start().await, Startup::ShowWizard);
    assert_eq!(wizard.state().step, WizardStep::TripDetails);
    assert_eq!(wizard.state().overlay, WizardOverlay::None);
}

#[tokio::test]
async fn test_startup_read_failure_falls_back_to_details() {
    let trips = FakeTrips::with_trip(trip("trip-9", "Lisbon", "2026-11-05", "2026-11-10"));
    let store = FakeStore::holding("trip-9");
    store.fail_reads.store(true, Ordering::SeqCst);
    let mut wizard = TripWizard::new(trips.clone(), store);

    assert_eq!(wizard.start().await, Startup::ShowWizard);
    assert!(!wizard.state().checking_active_trip);
    assert_eq!(wizard.state().step, WizardStep::TripDetails);
    assert_eq!(wizard.state().overlay, WizardOverlay::None);
    assert_eq!(*trips.fetches.lock().unwrap(), 0);
}

#[tokio::test]
async fn test_startup_with_unknown_trip_shows_wizard() {
    let mut wizard = TripWizard::new(FakeTrips::new(), FakeStore::holding("gone"));
    assert_eq!(wizard.start().await, Startup::ShowWizard);
}

#[tokio::test]
async fn test_can_proceed_is_live() {
    let (mut wizard, _trips, _store) = ready_wizard().await;

    assert!(!wizard.set_destination("Rio").unwrap());
    wizard.open_overlay(WizardOverlay::Calendar).unwrap();
    assert!(!wizard.select_day(day("2026-11-05")).unwrap());
    assert!(!wizard.select_day(day("2026-11-10")).unwrap());
    assert!(wizard.set_destination("Rome").unwrap());

    // A third tap restarts the range and disables progression again.
    assert!(!wizard.select_day(day("2026-11-20")).unwrap());
    assert!(!wizard.can_proceed());
}

#[tokio::test]
async fn test_calendar_view_tracks_range() {
    let (mut wizard, _trips, _store) = ready_wizard().await;
    wizard.open_overlay(WizardOverlay::Calendar).unwrap();
    wizard.select_day(day("2026-11-10")).unwrap();
    wizard.select_day(day("2026-11-05")).unwrap();

    let view = wizard.calendar_view(day("2026-11-01"));
    assert_eq!(view.min_date, day("2026-11-01"));
    assert_eq!(view.marked_dates.len(), 6);
    assert!(view.marked_dates["2026-11-05"].starting_day);
    assert!(view.marked_dates["2026-11-10"].ending_day);
}

#[tokio::test]
async fn test_select_day_requires_calendar_overlay() {
    let (mut wizard, _trips, _store) = ready_wizard().await;
    let err = wizard.select_day(day("2026-11-05")).unwrap_err();
    assert!(matches!(err, TripError::InvalidTransition { .. }));
    assert_eq!(wizard.draft().range, DateRange::empty());
}

#[tokio::test]
async fn test_advance_from_details_requires_valid_form() {
    let (mut wizard, _trips, _store) = ready_wizard().await;
    wizard.set_destination("Paris").unwrap();

    let err = wizard.advance().unwrap_err();
    assert!(matches!(
        err,
        TripError::Validation(ValidationError::MissingDates)
    ));
    assert_eq!(wizard.state().step, WizardStep::TripDetails);

    wizard.set_destination("Rio").unwrap();
    let err = wizard.advance().unwrap_err();
    assert!(matches!(
        err,
        TripError::Validation(ValidationError::DestinationTooShort { min: 4 })
    ));
}

#[tokio::test]
async fn test_overlays_belong_to_their_step() {
    let (mut wizard, _trips, _store) = ready_wizard().await;
    assert!(wizard.open_overlay(WizardOverlay::Guests).is_err());

    let (mut wizard, _trips, _store) = wizard_at_guests().await;
    assert!(wizard.open_overlay(WizardOverlay::Calendar).is_err());
    wizard.open_overlay(WizardOverlay::Guests).unwrap();
    assert_eq!(wizard.state().overlay, WizardOverlay::Guests);
}

#[tokio::test]
async fn test_destination_locked_while_adding_guests() {
    let (mut wizard, _trips, _store) = wizard_at_guests().await;
    assert!(wizard.set_destination("Berlin").is_err());
    assert_eq!(wizard.draft().destination, "Paris");
}

#[tokio::test]
async fn test_guests_are_managed_in_overlay() {
    let (mut wizard, _trips, _store) = wizard_at_guests().await;
    assert!(wizard.add_guest("a@b.com").is_err());

    wizard.open_overlay(WizardOverlay::Guests).unwrap();
    wizard.add_guest("a@b.com").unwrap();
    wizard.add_guest("c@d.com").unwrap();

    let err = wizard.add_guest("a@b.com").unwrap_err();
    assert!(matches!(
        err,
        TripError::Validation(ValidationError::DuplicateEmail { .. })
    ));
    let err = wizard.add_guest("not-an-email").unwrap_err();
    assert!(matches!(
        err,
        TripError::Validation(ValidationError::InvalidEmail { .. })
    ));

    wizard.remove_guest("c@d.com").unwrap();
    wizard.remove_guest("missing@x.com").unwrap();
    assert_eq!(wizard.draft().guests.emails(), ["a@b.com"]);
}

#[tokio::test]
async fn test_going_back_preserves_draft() {
    let (mut wizard, _trips, _store) = wizard_at_guests().await;
    wizard.open_overlay(WizardOverlay::Guests).unwrap();
    wizard.add_guest("a@b.com").unwrap();

    wizard.go_back_to_details().unwrap();
    assert_eq!(wizard.state().step, WizardStep::TripDetails);
    assert_eq!(wizard.state().overlay, WizardOverlay::None);
    assert_eq!(wizard.draft().destination, "Paris");
    assert!(wizard.draft().range.is_complete());
    assert_eq!(wizard.draft().guests.len(), 1);

    assert!(wizard.go_back_to_details().is_err());
}

#[tokio::test]
async fn test_submit_requires_confirmation() {
    let (mut wizard, trips, store) = wizard_at_guests().await;

    assert_eq!(wizard.advance().unwrap(), Advance::AwaitingConfirmation);
    assert!(wizard.state().awaiting_confirmation);
    // Nothing else happens until the user answers.
    assert!(wizard.open_overlay(WizardOverlay::Guests).is_err());

    let submission = wizard.confirm_submission(Answer::No).await.unwrap();
    assert!(matches!(submission, Submission::Cancelled));
    assert!(trips.created.lock().unwrap().is_empty());
    assert_eq!(store.current(), None);
    assert_eq!(wizard.state().step, WizardStep::AddGuests);
}

#[tokio::test]
async fn test_confirmation_without_request_is_rejected() {
    let (mut wizard, trips, _store) = wizard_at_guests().await;
    let err = wizard.confirm_submission(Answer::Yes).await.unwrap_err();
    assert!(matches!(err, TripError::InvalidTransition { .. }));
    assert!(trips.created.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_submit_creates_trip_and_saves_pointer() {
    let (mut wizard, trips, store) = wizard_at_guests().await;
    wizard.advance().unwrap();

    let Submission::Created {
        trip_id,
        navigation,
        warning,
    } = wizard.confirm_submission(Answer::Yes).await.unwrap()
    else {
        panic!("expected a created trip");
    };

    assert_eq!(trip_id, TripId::new("trip-1"));
    assert_eq!(navigation, Navigation::TripDetail { trip_id: trip_id.clone() });
    assert!(warning.is_none());
    assert_eq!(store.current(), Some(trip_id));

    let created = trips.created.lock().unwrap();
    assert_eq!(created.len(), 1);
    assert_eq!(created[0].destination, "Paris");
    assert!(created[0].emails_to_invite.is_empty());
    assert_eq!(created[0].starts_at, day("2026-11-05").to_timestamp().unwrap());
    assert_eq!(created[0].ends_at, day("2026-11-10").to_timestamp().unwrap());

    // The draft is discarded after a successful submission.
    assert_eq!(*wizard.state(), WizardState::default());
}

#[tokio::test]
async fn test_submit_sends_guests() {
    let (mut wizard, trips, _store) = wizard_at_guests().await;
    wizard.open_overlay(WizardOverlay::Guests).unwrap();
    wizard.add_guest("a@b.com").unwrap();
    wizard.add_guest("c@d.com").unwrap();
    wizard.advance().unwrap();
    wizard.confirm_submission(Answer::Yes).await.unwrap();

    assert_eq!(
        trips.created.lock().unwrap()[0].emails_to_invite,
        ["a@b.com", "c@d.com"]
    );
}

#[tokio::test]
async fn test_failed_create_keeps_wizard_for_retry() {
    let (mut wizard, trips, store) = wizard_at_guests().await;
    trips.fail_create.store(true, Ordering::SeqCst);
    wizard.advance().unwrap();

    let before = WizardState {
        awaiting_confirmation: false,
        ..wizard.state().clone()
    };
    let err = wizard.confirm_submission(Answer::Yes).await.unwrap_err();
    assert!(matches!(err, TripError::Remote(RemoteError::Network { .. })));
    assert_eq!(*wizard.state(), before);
    assert!(!wizard.state().creating);
    assert_eq!(store.current(), None);

    trips.fail_create.store(false, Ordering::SeqCst);
    wizard.advance().unwrap();
    assert!(matches!(
        wizard.confirm_submission(Answer::Yes).await.unwrap(),
        Submission::Created { .. }
    ));
}

#[tokio::test]
async fn test_pointer_failure_is_a_warning() {
    let (mut wizard, _trips, store) = wizard_at_guests().await;
    store.fail_writes.store(true, Ordering::SeqCst);
    wizard.advance().unwrap();

    let submission = wizard.confirm_submission(Answer::Yes).await.unwrap();
    let Submission::Created { warning, navigation, .. } = submission else {
        panic!("expected a created trip");
    };
    assert!(matches!(warning, Some(StorageError::StorageFull)));
    assert!(matches!(navigation, Navigation::TripDetail { .. }));
}

#[tokio::test]
async fn test_created_trip_bypasses_wizard_next_time() {
    let (mut wizard, trips, store) = wizard_at_guests().await;
    wizard.advance().unwrap();
    let Submission::Created { trip_id, .. } = wizard.confirm_submission(Answer::Yes).await.unwrap()
    else {
        panic!("expected a created trip");
    };
    trips
        .trips
        .lock()
        .unwrap()
        .push(trip(trip_id.as_str(), "Paris", "2026-11-05", "2026-11-10"));

    let mut next = TripWizard::new(trips, store);
    assert!(matches!(next.start().await, Startup::Resume(t) if t.id == trip_id));
}

#[tokio::test]
async fn test_busy_flag_rejects_reentry() {
    let (wizard, trips, store) = wizard_at_guests().await;
    let mut state = wizard.state().clone();
    state.creating = true;
    state.awaiting_confirmation = true;
    let mut wizard = TripWizard::from_state(state, trips.clone(), store);

    let err = wizard.confirm_submission(Answer::Yes).await.unwrap_err();
    assert!(matches!(err, TripError::Busy { .. }));
    assert!(matches!(wizard.advance().unwrap_err(), TripError::Busy { .. }));
    assert!(trips.created.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_unrepresentable_dates_are_not_sent() {
    let (mut wizard, trips, store) = ready_wizard().await;
    wizard.set_destination("Atlantis").unwrap();
    wizard.open_overlay(WizardOverlay::Calendar).unwrap();
    wizard.select_day(CalendarDay::new(jiff::civil::date(-9999, 1, 1))).unwrap();
    wizard.select_day(CalendarDay::new(jiff::civil::date(-9999, 1, 5))).unwrap();
    wizard.close_overlay().unwrap();
    wizard.advance().unwrap();
    wizard.advance().unwrap();

    let err = wizard.confirm_submission(Answer::Yes).await.unwrap_err();
    assert!(matches!(
        err,
        TripError::Validation(ValidationError::DateOutOfRange { .. })
    ));
    assert!(!wizard.state().creating);
    assert!(trips.created.lock().unwrap().is_empty());
    assert_eq!(store.current(), None);
}

#[test]
fn test_state_is_serializable() {
    let state = WizardState {
        step: WizardStep::AddGuests,
        overlay: WizardOverlay::Guests,
        ..WizardState::default()
    };
    let json = serde_json::to_string(&state).unwrap();
    let restored: WizardState = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, state);
}
