//! Student input and record types

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;

use super::validation::required_text;
use super::{EmailAddress, ValidationError};

/// Maximum length for first and last names
pub const MAX_NAME_LEN: usize = 100;

/// Validated student fields, used for both create and full-replace update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStudent {
    pub first_name: String,
    pub last_name: String,
    pub email: EmailAddress,
    pub date_of_birth: Option<NaiveDate>,
}

impl NewStudent {
    /// Validate raw student fields.
    ///
    /// # Rules
    /// - Names are trimmed, non-empty, max 100 characters
    /// - Email must be a syntactically valid address
    pub fn new(
        first_name: &str,
        last_name: &str,
        email: &str,
        date_of_birth: Option<NaiveDate>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            first_name: required_text("first_name", first_name, MAX_NAME_LEN)?,
            last_name: required_text("last_name", last_name, MAX_NAME_LEN)?,
            email: EmailAddress::new(email)?,
            date_of_birth,
        })
    }
}

/// Student record as stored
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Student {
    pub student_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub date_of_birth: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_names_and_normalizes_email() {
        let student = NewStudent::new(" Ada ", "Lovelace ", "ada@EXAMPLE.com", None).unwrap();
        assert_eq!(student.first_name, "Ada");
        assert_eq!(student.last_name, "Lovelace");
        assert_eq!(student.email.as_str(), "ada@example.com");
    }

    #[test]
    fn rejects_blank_last_name() {
        let err = NewStudent::new("Ada", "", "ada@example.com", None).unwrap_err();
        assert_eq!(err, ValidationError::Empty { field: "last_name" });
    }

    #[test]
    fn rejects_invalid_email() {
        let err = NewStudent::new("Ada", "Lovelace", "ada", None).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidFormat { field: "email", .. }));
    }
}
