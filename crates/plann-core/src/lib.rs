//! Core library for the Plann trip planner.
//!
//! This crate holds the business logic behind creating a trip, following it
//! from this device, and managing it afterwards. Transport and rendering are
//! left to the host; the core talks to them through the traits in
//! [`services`].
//!
//! # Architecture
//!
//! - **Models** ([`models`]): calendar days, date ranges and their marks,
//!   trip records and drafts
//! - **Validation** ([`validate`], [`guests`]): the total predicates that
//!   gate each form
//! - **Controllers** ([`wizard`], [`detail`]): serializable state machines for
//!   the creation wizard and the detail view of an existing trip
//! - **Storage** ([`store`], [`db`]): the single active trip pointer, kept in
//!   SQLite under the XDG data directory
//! - **Display** ([`display`]): header, invitation and status wording
//!
//! # Quick Start
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
//! match store.get().await? {
//!     Some(id) => println!("Following trip {id}"),
//!     None => println!("No active trip"),
//! }
//! # Ok(())
//! # }
//! ```

pub mod db;
pub mod detail;
pub mod display;
pub mod error;
pub mod flow;
pub mod guests;
pub mod models;
pub mod services;
pub mod store;
pub mod validate;
pub mod wizard;

#[cfg(test)]
mod testing;

// Re-export commonly used types
pub use db::Database;
pub use detail::{Completed, DetailOverlay, DetailState, DetailTab, Removal, TripDetail};
pub use display::{Invitation, OperationStatus, RangeText, TripWhen};
pub use error::{RemoteError, Result, StorageError, TripError, ValidationError};
pub use flow::{Answer, Navigation};
pub use guests::GuestList;
pub use models::{
    CalendarDay, CalendarView, DateRange, DayMark, MarkedDates, NewTrip,
    ParticipantConfirmation, TripDraft, TripId, TripRecord, TripUpdate,
};
pub use services::{ActiveTripStore, CalendarWidget, RemoteParticipantService, RemoteTripService};
pub use store::{ActiveTripStoreBuilder, SqliteTripStore};
pub use wizard::{
    Advance, Startup, Submission, TripWizard, WizardOverlay, WizardState, WizardStep,
};
