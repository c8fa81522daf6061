//! Status and confirmation message types for operation feedback.

use std::fmt;

use crate::error::StorageError;

/// Wrapper type for displaying operation confirmation messages.
///
/// Non-fatal warnings, such as a pointer that could not be persisted after
/// a successful remote call, are listed under the message.
pub struct OperationStatus {
    pub message: String,
    pub success: bool,
    pub warnings: Vec<String>,
}

impl OperationStatus {
    /// Create a new success status.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            success: true,
            warnings: Vec::new(),
        }
    }

    /// Create a new failure status.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            success: false,
            warnings: Vec::new(),
        }
    }

    /// Attach a storage warning, if any.
    #[must_use]
    pub fn with_warning(mut self, warning: Option<&StorageError>) -> Self {
        if let Some(warning) = warning {
            self.warnings.push(warning.to_string());
        }
        self
    }
}

impl fmt::Display for OperationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} {}", if self.success { "Success:" } else { "Error:" }, self.message)?;
        for warning in &self.warnings {
            writeln!(f, "Warning: {warning}")?;
        }
        Ok(())
    }
}
