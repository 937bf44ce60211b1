//! Store error types

use std::fmt;

/// Unique constraints in the portal schema
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniqueKey {
    StudentEmail,
    CourseCode,
    EnrollmentPair,
}

impl UniqueKey {
    /// Constraint name as declared in the migration.
    pub fn constraint(&self) -> &'static str {
        match self {
            Self::StudentEmail => "students_email_key",
            Self::CourseCode => "courses_course_code_key",
            Self::EnrollmentPair => "enrollments_student_course_key",
        }
    }

    pub fn from_constraint(name: &str) -> Option<Self> {
        [Self::StudentEmail, Self::CourseCode, Self::EnrollmentPair]
            .into_iter()
            .find(|key| key.constraint() == name)
    }
}

impl fmt::Display for UniqueKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.constraint())
    }
}

/// Foreign keys in the portal schema
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForeignKey {
    EnrollmentStudent,
    EnrollmentCourse,
}

impl ForeignKey {
    /// Constraint name as declared in the migration.
    pub fn constraint(&self) -> &'static str {
        match self {
            Self::EnrollmentStudent => "enrollments_student_id_fkey",
            Self::EnrollmentCourse => "enrollments_course_id_fkey",
        }
    }

    pub fn from_constraint(name: &str) -> Option<Self> {
        [Self::EnrollmentStudent, Self::EnrollmentCourse]
            .into_iter()
            .find(|key| key.constraint() == name)
    }
}

impl fmt::Display for ForeignKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.constraint())
    }
}

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("unique constraint violated: {0}")]
    UniqueViolation(UniqueKey),

    #[error("foreign key constraint violated: {0}")]
    ForeignKeyViolation(ForeignKey),
}

impl DbError {
    /// Classify a sqlx error, lifting known constraint violations.
    pub fn from_sqlx(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            let constraint = db_err.constraint();
            match db_err.kind() {
                sqlx::error::ErrorKind::UniqueViolation => {
                    if let Some(key) = constraint.and_then(UniqueKey::from_constraint) {
                        return Self::UniqueViolation(key);
                    }
                }
                sqlx::error::ErrorKind::ForeignKeyViolation => {
                    if let Some(key) = constraint.and_then(ForeignKey::from_constraint) {
                        return Self::ForeignKeyViolation(key);
                    }
                }
                _ => {}
            }
        }
        Self::Sqlx(err)
    }
}
