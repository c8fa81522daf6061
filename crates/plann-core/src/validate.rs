//! Total predicates that gate progression through the trip forms.
//!
//! None of these fail; callers decide what feedback to show.

use crate::{error::ValidationError, models::DateRange};

/// Minimum trimmed destination length accepted by the wizard.
pub const MIN_DESTINATION_LEN: usize = 4;

/// True iff the trimmed destination has at least [`MIN_DESTINATION_LEN`]
/// characters and both range bounds are selected.
pub fn can_proceed_from_details(destination: &str, range: &DateRange) -> bool {
    check_details(destination, range).is_ok()
}

/// Same rule as [`can_proceed_from_details`], naming the first failure.
pub fn check_details(destination: &str, range: &DateRange) -> Result<(), ValidationError> {
    if destination.trim().chars().count() < MIN_DESTINATION_LEN {
        return Err(ValidationError::DestinationTooShort {
            min: MIN_DESTINATION_LEN,
        });
    }
    if !range.is_complete() {
        return Err(ValidationError::MissingDates);
    }
    Ok(())
}

/// Shape check for `local@domain.tld`. No lookup is performed.
///
/// The local part and every domain label must be non-empty, the domain needs
/// at least one dot, and whitespace is rejected anywhere.
pub fn is_valid_email(s: &str) -> bool {
    if s.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = s.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') || !domain.contains('.') {
        return false;
    }
    domain.split('.').all(|label| !label.is_empty())
}
