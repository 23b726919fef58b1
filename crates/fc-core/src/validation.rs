use thiserror::Error;

/// A required field was missing or out of range.
///
/// Raised before any network or storage call is made.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Name of the offending field
    pub field: &'static str,
    /// Human-readable reason
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Reject empty or whitespace-only values.
///
/// # Examples
/// ```
/// use fc_core::validation::require_non_blank;
///
/// assert!(require_non_blank("deck_name", "Biology").is_ok());
/// assert!(require_non_blank("deck_name", "   ").is_err());
/// ```
pub fn require_non_blank(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new(
            field,
            format!("Please enter a {}", field.replace('_', " ")),
        ));
    }

    Ok(())
}
