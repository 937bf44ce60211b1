//! Validation error types and shared text rules

use std::fmt;

/// Validation error for domain models
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Field is empty when it shouldn't be
    Empty { field: &'static str },

    /// Field exceeds maximum length
    TooLong { field: &'static str, max: usize },

    /// String doesn't match required format (e.g., email)
    InvalidFormat { field: &'static str, reason: &'static str },

    /// Integer outside its accepted range
    OutOfRange {
        field: &'static str,
        min: i64,
        max: i64,
    },

    /// Integer below zero
    Negative { field: &'static str },

    /// Request body is not JSON of the expected shape
    MalformedBody { detail: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{} cannot be empty", field),
            Self::TooLong { field, max } => {
                write!(f, "{} exceeds maximum length of {} characters", field, max)
            }
            Self::InvalidFormat { field, reason } => {
                write!(f, "{}: {}", field, reason)
            }
            Self::OutOfRange { field, min, max } => {
                write!(f, "{} must be between {} and {}", field, min, max)
            }
            Self::Negative { field } => write!(f, "{} must not be negative", field),
            Self::MalformedBody { detail } => write!(f, "invalid request body: {}", detail),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Trim a required text field and enforce its column width.
pub(crate) fn required_text(
    field: &'static str,
    value: &str,
    max: usize,
) -> Result<String, ValidationError> {
    let trimmed = value.trim();

    if trimmed.is_empty() {
        return Err(ValidationError::Empty { field });
    }

    // VARCHAR widths count characters, not bytes
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
        Some(text) => required_text(field, text, max).map(Some),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ValidationError::TooLong {
            field: "first_name",
            max: 100,
        };
        assert_eq!(
            err.to_string(),
            "first_name exceeds maximum length of 100 characters"
        );

        let err = ValidationError::OutOfRange {
            field: "credit_hours",
            min: 0,
            max: 30,
        };
        assert_eq!(err.to_string(), "credit_hours must be between 0 and 30");
    }

    #[test]
    fn required_text_trims() {
        assert_eq!(required_text("name", "  Ada  ", 10).unwrap(), "Ada");
    }

    #[test]
    fn required_text_rejects_blank() {
        let err = required_text("name", "   ", 10).unwrap_err();
        assert_eq!(err, ValidationError::Empty { field: "name" });
    }

    #[test]
    fn required_text_counts_chars() {
        // 5 chars, 10 bytes
        assert!(required_text("name", "ééééé", 5).is_ok());
        assert!(required_text("name", "éééééé", 5).is_err());
    }

    #[test]
    fn optional_text_blank_is_none() {
        assert_eq!(optional_text("grade", None, 5).unwrap(), None);
        assert_eq!(optional_text("grade", Some("  "), 5).unwrap(), None);
        assert_eq!(
            optional_text("grade", Some(" A- "), 5).unwrap(),
            Some("A-".to_owned())
        );
    }
}
