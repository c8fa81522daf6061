//! Marked-dates projection for calendar rendering.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{CalendarDay, DateRange};

/// Per-day annotations keyed by ISO date string, ordered chronologically.
pub type MarkedDates = BTreeMap<String, DayMark>;

/// How a single day participates in the selected range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayMark {
    pub starting_day: bool,
    pub ending_day: bool,
}

/// Position of a marked day within its range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkKind {
    /// Start and end of a one-day range
    Single,
    Start,
    InRange,
    End,
}

impl DayMark {
    pub fn kind(&self) -> MarkKind {
        match (self.starting_day, self.ending_day) {
            (true, true) => MarkKind::Single,
            (true, false) => MarkKind::Start,
            (false, true) => MarkKind::End,
            (false, false) => MarkKind::InRange,
        }
    }
}

/// Everything the calendar widget needs to draw the current selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarView {
    pub marked_dates: MarkedDates,
    /// Earliest day the widget lets the user tap
    pub min_date: CalendarDay,
}

impl CalendarView {
    pub fn new(range: &DateRange, min_date: CalendarDay) -> Self {
        Self {
            marked_dates: range.marks(),
            min_date,
        }
    }
}
