//! Date span wording for trip headers and invitations.

use std::fmt;

use crate::models::{DateRange, TripRecord};

/// Longest destination shown verbatim in a trip header.
pub const MAX_DESTINATION_CHARS: usize = 10;

/// Truncates `destination` to [`MAX_DESTINATION_CHARS`] characters, adding
/// `...` when anything was cut.
pub fn truncate_destination(destination: &str) -> String {
    if destination.chars().count() > MAX_DESTINATION_CHARS {
        let head: String = destination.chars().take(MAX_DESTINATION_CHARS).collect();
        format!("{head}...")
    } else {
        destination.to_string()
    }
}

/// The one-line header of a trip, e.g. `Florianópo... from 5 to 10 of November.`
pub struct TripWhen<'a>(pub &'a TripRecord);

impl<'a> fmt::Display for TripWhen<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} from {}.",
            truncate_destination(&self.0.destination),
            self.0.range().format_in_text()
        )
    }
}

/// Invitation line shown while confirming attendance.
///
/// Names the end month only, e.g. `Rome on the dates of 5 to 10 November`.
pub struct Invitation<'a>(pub &'a TripRecord);

impl<'a> fmt::Display for Invitation<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let trip = self.0;
        write!(
            f,
            "{} on the dates of {} to {} {}",
            trip.destination,
            trip.starts_at.day(),
            trip.ends_at.day(),
            trip.ends_at.month_name()
        )
    }
}

/// Text form of a range, empty when nothing is selected.
pub struct RangeText<'a>(pub &'a DateRange);

impl<'a> fmt::Display for RangeText<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.format_in_text())
    }
}
