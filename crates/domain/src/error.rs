//! Domain error types.

use thiserror::Error;

/// Errors raised while constructing an event.
///
/// An event that fails validation is never appended.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field was empty or only whitespace.
    #[error("{field} is required")]
    MissingField { field: &'static str },
}

/// Fails with `MissingField` when `value` is blank.
pub(crate) fn require(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::MissingField { field });
    }
    Ok(())
}
