//! Data models for trips and date selection.
//!
//! This module contains the domain values that flow through the wizard and
//! the trip detail controller:
//!
//! - [`CalendarDay`]: a tapped day, compared by calendar date only
//! - [`DateRange`]: a possibly partial start/end pair, built tap by tap with
//!   [`select_day`]
//! - [`MarkedDates`]: the per-day projection of a range for the calendar
//! - [`TripRecord`]: the remote trip, read-only here
//! - [`TripDraft`]: destination, range and guests while creating a trip
//!
//! # Examples
//!
//! ```rust
//! use plann_core::models::{CalendarDay, DateRange};
//!
//! let ten: CalendarDay = "2026-11-10".parse()?;
//! let five: CalendarDay = "2026-11-05".parse()?;
//!
//! let range = DateRange::empty().select(ten).select(five);
//! assert_eq!(range.starts_at, Some(five));
//! assert_eq!(range.ends_at, Some(ten));
//! assert_eq!(range.format_in_text(), "5 to 10 of November");
//! # Ok::<(), jiff::Error>(())
//! ```

pub mod calendar;
pub mod marks;
pub mod range;
pub mod trip;


pub use calendar::CalendarDay;
pub use marks::{CalendarView, DayMark, MarkKind, MarkedDates};
pub use range::{select_day, DateRange};
pub use trip::{NewTrip, ParticipantConfirmation, TripDraft, TripId, TripRecord, TripUpdate};
