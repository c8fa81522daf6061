//! Calendar day model handed over by the calendar widget.

use std::{fmt, str::FromStr};

use jiff::{civil::Date, tz::TimeZone, Timestamp};
use serde::{Deserialize, Serialize};

/// A single day tapped on the calendar.
///
/// Only the calendar date matters; time of day is never carried, so two days
/// compare equal exactly when they name the same date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CalendarDay(Date);

impl CalendarDay {
    /// Wraps an existing civil date.
    pub fn new(date: Date) -> Self {
        Self(date)
    }

    /// Today's date in the system time zone.
    pub fn today() -> Self {
        Self(jiff::Zoned::now().date())
    }

    /// The ISO `YYYY-MM-DD` representation used as a marked-dates key.
    pub fn date_string(&self) -> String {
        self.0.to_string()
    }

    pub fn date(&self) -> Date {
        self.0
    }

    pub fn day(&self) -> i8 {
        self.0.day()
    }

    /// Full English month name, e.g. `November`.
    pub fn month_name(&self) -> String {
        self.0.strftime("%B").to_string()
    }

    /// Returns true when both days fall in the same month of the same year.
    pub fn same_month(&self, other: &CalendarDay) -> bool {
        self.0.year() == other.0.year() && self.0.month() == other.0.month()
    }

    /// The instant at UTC midnight of this day, used as the normalized bound
    /// sent to the remote service.
    ///
    /// # Errors
    ///
    /// Fails for days at the edge of the supported range whose UTC midnight
    /// has no timestamp.
    pub fn to_timestamp(&self) -> Result<Timestamp, jiff::Error> {
        self.0.to_zoned(TimeZone::UTC).map(|zoned| zoned.timestamp())
    }

    /// Reads either a plain ISO date or an RFC 3339 timestamp, keeping only
    /// the UTC calendar date.
    pub fn parse_lenient(s: &str) -> Result<Self, jiff::Error> {
        match s.parse::<Date>() {
            Ok(date) => Ok(Self(date)),
            Err(_) => {
                let ts: Timestamp = s.parse()?;
                Ok(Self(ts.to_zoned(TimeZone::UTC).date()))
            }
        }
    }
}

impl From<Date> for CalendarDay {
    fn from(date: Date) -> Self {
        Self(date)
    }
}

impl FromStr for CalendarDay {
    type Err = jiff::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<Date>().map(Self)
    }
}

impl fmt::Display for CalendarDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Serde helper for remote records whose dates may be full timestamps.
pub(crate) mod lenient {
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    use super::CalendarDay;

    pub fn serialize<S: Serializer>(day: &CalendarDay, serializer: S) -> Result<S::Ok, S::Error> {
        let timestamp = day.to_timestamp().map_err(serde::ser::Error::custom)?;
        serializer.collect_str(&timestamp)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<CalendarDay, D::Error> {
        let raw = String::deserialize(deserializer)?;
        CalendarDay::parse_lenient(&raw).map_err(D::Error::custom)
    }
}
