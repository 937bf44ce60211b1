//! Enrollment input and record types

use chrono::NaiveDate;
use sqlx::FromRow;

use super::validation::optional_text;
use super::ValidationError;

const MAX_GRADE_LEN: usize = 5;

/// Validated enrollment fields
///
/// The referenced ids are not checked here; existence is a store concern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEnrollment {
    pub student_id: i64,
    pub course_id: i64,
    pub grade: Option<String>,
}

impl NewEnrollment {
    pub fn new(
        student_id: i64,
        course_id: i64,
        grade: Option<&str>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            student_id,
            course_id,
            grade: optional_text("grade", grade, MAX_GRADE_LEN)?,
        })
    }
}

/// Enrollment record as stored
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Enrollment {
    pub enrollment_id: i64,
    pub student_id: i64,
    pub course_id: i64,
    pub grade: Option<String>,
    pub enrollment_date: NaiveDate,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grade_is_optional() {
        let enrollment = NewEnrollment::new(1, 2, None).unwrap();
        assert_eq!(enrollment.grade, None);
    }

    #[test]
    fn grade_too_long() {
        let err = NewEnrollment::new(1, 2, Some("EXCELLENT")).unwrap_err();
        assert!(matches!(err, ValidationError::TooLong { field: "grade", max: 5 }));
    }
}
