//! Two-tap date range selection.
//!
//! A calendar delivers unordered taps. [`select_day`] folds each tap into the
//! current [`DateRange`] so that the result is always a valid, ordered range:
//!
//! | current            | tap            | result                 |
//! |--------------------|----------------|------------------------|
//! | empty              | `d`            | `{d, -}`               |
//! | `{s, e}` complete  | `d`            | `{d, -}` (restart)     |
//! | `{s, -}`           | `d < s`        | `{d, s}` (swap)        |
//! | `{s, -}`           | `d >= s`       | `{s, d}`               |
//!
//! Equal taps collapse to a one-day range. Minimum-day bounds belong to the
//! calendar widget; any tapped day is accepted here.

use jiff::ToSpan;
use serde::{Deserialize, Serialize};

use super::{CalendarDay, DayMark, MarkedDates};

/// A possibly partial start/end pair of calendar days.
///
/// When both bounds are present, `starts_at <= ends_at`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub starts_at: Option<CalendarDay>,
    pub ends_at: Option<CalendarDay>,
}

impl DateRange {
    /// An empty range with no bounds selected.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A complete range, reordering the bounds if needed.
    pub fn between(a: CalendarDay, b: CalendarDay) -> Self {
        Self {
            starts_at: Some(a.min(b)),
            ends_at: Some(a.max(b)),
        }
    }

    /// Both bounds are present.
    pub fn is_complete(&self) -> bool {
        self.starts_at.is_some() && self.ends_at.is_some()
    }

    /// Both bounds, when the range is complete.
    pub fn bounds(&self) -> Option<(CalendarDay, CalendarDay)> {
        self.starts_at.zip(self.ends_at)
    }

    /// Folds a tapped day into this range. See [`select_day`].
    #[must_use]
    pub fn select(&self, tapped: CalendarDay) -> Self {
        select_day(self, tapped)
    }

    /// Projects the range onto per-day calendar marks.
    ///
    /// Every day in `[starts_at, ends_at]` gets a mark; a start-only range
    /// yields a single day that is both the start and the end.
    pub fn marks(&self) -> MarkedDates {
        let mut marks = MarkedDates::new();
        let Some(start) = self.starts_at else {
            return marks;
        };
        let end = self.ends_at.unwrap_or(start);

        for date in start.date().series(1.day()) {
            let day = CalendarDay::new(date);
            if day > end {
                break;
            }
            marks.insert(
                day.date_string(),
                DayMark {
                    starting_day: day == start,
                    ending_day: day == end,
                },
            );
        }
        marks
    }

    /// Human-readable text for the selected span.
    ///
    /// `"5 to 10 of November"` within one month, `"28 of November to 3 of
    /// December"` across months, `"5 of November"` with only a start, and an
    /// empty string when nothing is selected.
    pub fn format_in_text(&self) -> String {
        match (self.starts_at, self.ends_at) {
            (None, _) => String::new(),
            (Some(start), None) => format!("{} of {}", start.day(), start.month_name()),
            (Some(start), Some(end)) if start.same_month(&end) => {
                format!("{} to {} of {}", start.day(), end.day(), end.month_name())
            }
            (Some(start), Some(end)) => format!(
                "{} of {} to {} of {}",
                start.day(),
                start.month_name(),
                end.day(),
                end.month_name()
            ),
        }
    }
}

/// Interprets one calendar tap against the current range.
///
/// A tap with no start, or on top of a complete range, starts a new range.
/// A second tap before the start swaps the bounds instead of producing an
/// inverted range.
pub fn select_day(current: &DateRange, tapped: CalendarDay) -> DateRange {
    match (current.starts_at, current.ends_at) {
        (Some(start), None) if tapped < start => DateRange {
            starts_at: Some(tapped),
            ends_at: Some(start),
        },
        (Some(start), None) => DateRange {
            starts_at: Some(start),
            ends_at: Some(tapped),
        },
        _ => DateRange {
            starts_at: Some(tapped),
            ends_at: None,
        },
    }
}
