//! Store abstraction consumed by the record service

use async_trait::async_trait;

use super::DbError;
use crate::models::{
    Course, Enrollment, NewCourse, NewEnrollment, NewStudent, Pagination, Student,
};

/// One method per SQL statement the service issues.
///
/// Implementations must report constraint violations as
/// [`DbError::UniqueViolation`] / [`DbError::ForeignKeyViolation`] so the
/// service can map them to domain errors.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Cheap liveness probe.
    async fn ping(&self) -> Result<(), DbError>;

    async fn insert_student(&self, student: &NewStudent) -> Result<Student, DbError>;

    /// Students ordered by id.
    async fn list_students(&self, page: Pagination) -> Result<Vec<Student>, DbError>;

    async fn fetch_student(&self, student_id: i64) -> Result<Option<Student>, DbError>;

    /// Overwrite every mutable field; `None` when no row matched.
    async fn update_student(
        &self,
        student_id: i64,
        student: &NewStudent,
    ) -> Result<Option<Student>, DbError>;

    /// Returns the number of rows removed.
    async fn delete_student(&self, student_id: i64) -> Result<u64, DbError>;

    async fn student_exists(&self, student_id: i64) -> Result<bool, DbError>;

    async fn insert_course(&self, course: &NewCourse) -> Result<Course, DbError>;

    /// Courses ordered by id.
    async fn list_courses(&self, page: Pagination) -> Result<Vec<Course>, DbError>;

    async fn course_exists(&self, course_id: i64) -> Result<bool, DbError>;

    async fn insert_enrollment(&self, enrollment: &NewEnrollment)
        -> Result<Enrollment, DbError>;

    /// Enrollments ordered by id.
    async fn list_enrollments(&self, page: Pagination) -> Result<Vec<Enrollment>, DbError>;

    /// Courses joined through the student's enrollments, ordered by course id.
    async fn courses_for_student(&self, student_id: i64) -> Result<Vec<Course>, DbError>;

    /// Students joined through the course's enrollments, ordered by student id.
    async fn students_for_course(&self, course_id: i64) -> Result<Vec<Student>, DbError>;
}
