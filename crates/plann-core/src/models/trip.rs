//! Trip records, drafts and the request payloads built from them.

use std::fmt;

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{calendar::lenient, CalendarDay, DateRange};
use crate::{error::ValidationError, guests::GuestList};

/// Identifier assigned to a trip by the remote service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TripId(String);

impl TripId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TripId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TripId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for TripId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A trip as owned by the remote service. Read-only to this crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripRecord {
    pub id: TripId,
    pub destination: String,
    #[serde(with = "lenient")]
    pub starts_at: CalendarDay,
    #[serde(with = "lenient")]
    pub ends_at: CalendarDay,
    #[serde(default)]
    pub is_confirmed: bool,
}

impl TripRecord {
    /// The record's dates as a complete range.
    pub fn range(&self) -> DateRange {
        DateRange::between(self.starts_at, self.ends_at)
    }
}

/// In-progress trip creation state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripDraft {
    pub destination: String,
    pub range: DateRange,
    pub guests: GuestList,
}

/// Payload of the remote "create trip" call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTrip {
    pub destination: String,
    pub starts_at: Timestamp,
    pub ends_at: Timestamp,
    pub emails_to_invite: Vec<String>,
}

/// UTC midnight of `day`, or a validation error for unrepresentable days.
fn wire_bound(day: CalendarDay) -> Result<Timestamp, ValidationError> {
    day.to_timestamp().map_err(|_| ValidationError::DateOutOfRange {
        day: day.to_string(),
    })
}

impl NewTrip {
    /// Builds the request from a draft.
    ///
    /// # Errors
    ///
    /// * `ValidationError::MissingDates` - the range is incomplete
    /// * `ValidationError::DateOutOfRange` - a bound has no UTC timestamp
    pub fn from_draft(draft: &TripDraft) -> Result<Self, ValidationError> {
        let (start, end) = draft.range.bounds().ok_or(ValidationError::MissingDates)?;
        Ok(Self {
            destination: draft.destination.clone(),
            starts_at: wire_bound(start)?,
            ends_at: wire_bound(end)?,
            emails_to_invite: draft.guests.emails().to_vec(),
        })
    }
}

/// Payload of the remote "update trip" call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripUpdate {
    pub destination: String,
    pub starts_at: Timestamp,
    pub ends_at: Timestamp,
}

impl TripUpdate {
    pub fn new(
        destination: impl Into<String>,
        start: CalendarDay,
        end: CalendarDay,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            destination: destination.into(),
            starts_at: wire_bound(start)?,
            ends_at: wire_bound(end)?,
        })
    }
}

/// Payload of the remote "confirm participant" call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantConfirmation {
    pub participant_id: String,
    pub name: String,
    pub email: String,
}
