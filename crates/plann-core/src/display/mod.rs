//! Display wrappers for trip output.
//!
//! Domain models stay free of presentation logic; these newtypes format them
//! for a given context:
//!
//! - [`datetime`]: trip header (`when`), invitation line and range text
//! - [`status`]: operation confirmations with optional warnings

pub mod datetime;
pub mod status;

pub use datetime::{truncate_destination, Invitation, RangeText, TripWhen};
pub use status::OperationStatus;
