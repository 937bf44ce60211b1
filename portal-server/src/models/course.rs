//! Course input and record types

use sqlx::FromRow;

use super::validation::{optional_text, required_text};
use super::ValidationError;

const MAX_COURSE_NAME_LEN: usize = 200;
const MAX_COURSE_CODE_LEN: usize = 20;
const MAX_DEPARTMENT_LEN: usize = 100;

/// Accepted range for credit hours
pub const CREDIT_HOURS_RANGE: std::ops::RangeInclusive<i32> = 0..=30;

/// Validated course fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCourse {
    pub course_name: String,
    pub course_code: String,
    pub credit_hours: i32,
    pub department: Option<String>,
}

impl NewCourse {
    /// Validate raw course fields.
    ///
    /// A blank department is stored as absent.
    pub fn new(
        course_name: &str,
        course_code: &str,
        credit_hours: i32,
        department: Option<&str>,
    ) -> Result<Self, ValidationError> {
        if !CREDIT_HOURS_RANGE.contains(&credit_hours) {
            return Err(ValidationError::OutOfRange {
                field: "credit_hours",
                min: i64::from(*CREDIT_HOURS_RANGE.start()),
                max: i64::from(*CREDIT_HOURS_RANGE.end()),
            });
        }

        Ok(Self {
            course_name: required_text("course_name", course_name, MAX_COURSE_NAME_LEN)?,
            course_code: required_text("course_code", course_code, MAX_COURSE_CODE_LEN)?,
            credit_hours,
            department: optional_text("department", department, MAX_DEPARTMENT_LEN)?,
        })
    }
}

/// Course record as stored
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Course {
    pub course_id: i64,
    pub course_name: String,
    pub course_code: String,
    pub credit_hours: i32,
    pub department: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_course() {
        let course = NewCourse::new("Databases", " CS340 ", 4, Some("  ")).unwrap();
        assert_eq!(course.course_code, "CS340");
        assert_eq!(course.department, None);
    }

    #[test]
    fn credit_hours_bounds() {
        assert!(NewCourse::new("Seminar", "SEM0", 0, None).is_ok());
        assert!(NewCourse::new("Thesis", "THS1", 30, None).is_ok());

        let err = NewCourse::new("Broken", "BRK1", -1, None).unwrap_err();
        assert!(matches!(err, ValidationError::OutOfRange { field: "credit_hours", .. }));
        assert!(NewCourse::new("Broken", "BRK1", 31, None).is_err());
    }

    #[test]
    fn course_code_max_length() {
        assert!(NewCourse::new("Long", &"C".repeat(20), 3, None).is_ok());
        let err = NewCourse::new("Long", &"C".repeat(21), 3, None).unwrap_err();
        assert!(matches!(err, ValidationError::TooLong { max: 20, .. }));
    }
}
