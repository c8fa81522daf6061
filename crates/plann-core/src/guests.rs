//! Guest list management for the trip wizard.

use serde::{Deserialize, Serialize};

use crate::{error::ValidationError, validate::is_valid_email};

/// Emails of the people to invite, kept in insertion order for display.
///
/// Duplicates are detected by exact, case-sensitive match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GuestList(Vec<String>);

impl GuestList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a list with `email` appended.
    ///
    /// # Errors
    ///
    /// * `ValidationError::InvalidEmail` - `email` is not shaped like an
    ///   address
    /// * `ValidationError::DuplicateEmail` - `email` is already on the list
    pub fn add(&self, email: &str) -> Result<Self, ValidationError> {
        if !is_valid_email(email) {
            return Err(ValidationError::InvalidEmail {
                email: email.to_string(),
            });
        }
        if self.contains(email) {
            return Err(ValidationError::DuplicateEmail {
                email: email.to_string(),
            });
        }
        let mut emails = self.0.clone();
        emails.push(email.to_string());
        Ok(Self(emails))
    }

    /// Returns a list without `email`. Removing an absent email is a no-op.
    #[must_use]
    pub fn remove(&self, email: &str) -> Self {
        Self(self.0.iter().filter(|e| *e != email).cloned().collect())
    }

    pub fn contains(&self, email: &str) -> bool {
        self.0.iter().any(|e| e == email)
    }

    pub fn emails(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_appends_in_order() {
        let list = GuestList::new()
            .add("b@b.com")
            .and_then(|l| l.add("a@a.com"))
            .expect("valid guests");
        assert_eq!(list.emails(), ["b@b.com", "a@a.com"]);
    }

    #[test]
    fn test_duplicate_is_rejected() {
        let list = GuestList::new().add("a@b.com").unwrap();
        let err = list.add("a@b.com").unwrap_err();
        assert_eq!(
            err,
            ValidationError::DuplicateEmail {
                email: "a@b.com".to_string()
            }
        );
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_duplicate_check_is_case_sensitive() {
        let list = GuestList::new().add("a@b.com").unwrap();
        let list = list.add("A@b.com").expect("different case is a new guest");
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_invalid_email_leaves_list_unchanged() {
        let list = GuestList::new().add("a@b.com").unwrap();
        let err = list.add("not-an-email").unwrap_err();
        assert!(matches!(err, ValidationError::InvalidEmail { .. }));
        assert_eq!(list.emails(), ["a@b.com"]);
    }

    #[test]
    fn test_remove() {
        let list = GuestList::new()
            .add("a@b.com")
            .and_then(|l| l.add("c@d.com"))
            .unwrap();
        let list = list.remove("a@b.com");
        assert_eq!(list.emails(), ["c@d.com"]);

        let same = list.remove("missing@x.com");
        assert_eq!(same, list);
    }
}
