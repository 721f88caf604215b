//! Validation error types

use std::fmt;

/// Validation error for request payloads and domain values
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Field is empty when it shouldn't be
    Empty { field: &'static str },

    /// Field exceeds maximum length (in characters)
    TooLong { field: &'static str, max: usize },

    /// Numeric field below zero
    Negative { field: &'static str },

    /// Id in the URL differs from the id in the body
    IdMismatch { path: i64, body: i64 },

    /// Payload could not be decoded at all
    Malformed { reason: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{} cannot be empty", field),
            Self::TooLong { field, max } => {
                write!(f, "{} exceeds maximum length of {} characters", field, max)
            }
            Self::Negative { field } => write!(f, "{} cannot be negative", field),
            Self::IdMismatch { path, body } => {
                write!(f, "URL id {} must match the object id {}", path, body)
            }
            Self::Malformed { reason } => write!(f, "malformed request: {}", reason),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Trim `value` and check it against `max` characters.
pub(crate) fn required_text(
    field: &'static str,
    value: &str,
    max: usize,
) -> Result<String, ValidationError> {
    let trimmed = value.trim();

    if trimmed.is_empty() {
        return Err(ValidationError::Empty { field });
    }

    if trimmed.chars().count() > max {
        return Err(ValidationError::TooLong { field, max });
    }

    Ok(trimmed.to_owned())
}

/// Like [`required_text`], but blank input collapses to `None`.
pub(crate) fn optional_text(
    field: &'static str,
    value: Option<&str>,
    max: usize,
) -> Result<Option<String>, ValidationError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) => required_text(field, v, max).map(Some),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ValidationError::TooLong {
            field: "name",
            max: 50,
        };
        assert_eq!(err.to_string(), "name exceeds maximum length of 50 characters");

        let err = ValidationError::IdMismatch { path: 1, body: 2 };
        assert_eq!(err.to_string(), "URL id 1 must match the object id 2");
    }

    #[test]
    fn required_text_trims() {
        assert_eq!(required_text("name", "  Pooh ", 50).unwrap(), "Pooh");
    }

    #[test]
    fn required_text_rejects_blank() {
        assert!(matches!(
            required_text("name", "   ", 50).unwrap_err(),
            ValidationError::Empty { field: "name" }
        ));
    }

    #[test]
    fn required_text_counts_characters_not_bytes() {
        // 20 two-byte characters fit a 20 character column
        let value = "é".repeat(20);
        assert!(required_text("color", &value, 20).is_ok());

        let value = "é".repeat(21);
        assert!(matches!(
            required_text("color", &value, 20).unwrap_err(),
            ValidationError::TooLong { max: 20, .. }
        ));
    }

    #[test]
    fn optional_text_blank_is_none() {
        assert_eq!(optional_text("accent color", None, 20).unwrap(), None);
        assert_eq!(optional_text("accent color", Some("  "), 20).unwrap(), None);
        assert_eq!(
            optional_text("accent color", Some("red"), 20).unwrap(),
            Some("red".to_owned())
        );
    }
}
