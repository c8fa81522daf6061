//! Values exchanged between the state machines and their host.

use serde::{Deserialize, Serialize};

use crate::models::TripId;

/// The user's answer to a yes/no confirmation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Answer {
    Yes,
    No,
}

impl From<bool> for Answer {
    fn from(yes: bool) -> Self {
        if yes {
            Answer::Yes
        } else {
            Answer::No
        }
    }
}

/// Where the host should navigate after an action completes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "to", rename_all = "snake_case")]
pub enum Navigation {
    /// Detail view of the given trip
    TripDetail { trip_id: TripId },
    /// The no-active-trip creation wizard
    Wizard,
}
