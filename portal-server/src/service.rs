//! Record service - students, courses and enrollments
//!
//! Stateless: every call borrows the injected store for its duration and
//! holds nothing afterwards. Store constraint violations are translated
//! into domain errors here.

use crate::db::{DbError, ForeignKey, RecordStore, UniqueKey};
use crate::models::{
    Course, Enrollment, NewCourse, NewEnrollment, NewStudent, Pagination, Student,
};

pub const STUDENT_NOT_FOUND: &str = "Student not found";
pub const COURSE_NOT_FOUND: &str = "Course not found";
pub const EMAIL_EXISTS: &str = "Email already exists";
pub const COURSE_CODE_EXISTS: &str = "Course code already exists";
pub const ALREADY_ENROLLED: &str = "Student already enrolled in this course";

/// Record service failure
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Referenced record is absent
    #[error("{0}")]
    NotFound(&'static str),

    /// Uniqueness violated
    #[error("{0}")]
    Conflict(&'static str),

    /// Opaque store failure
    #[error(transparent)]
    Store(DbError),
}

impl From<DbError> for ServiceError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::UniqueViolation(key) => Self::Conflict(match key {
                UniqueKey::StudentEmail => EMAIL_EXISTS,
                UniqueKey::CourseCode => COURSE_CODE_EXISTS,
                UniqueKey::EnrollmentPair => ALREADY_ENROLLED,
            }),
            DbError::ForeignKeyViolation(ForeignKey::EnrollmentStudent) => {
                Self::NotFound(STUDENT_NOT_FOUND)
            }
            DbError::ForeignKeyViolation(ForeignKey::EnrollmentCourse) => {
                Self::NotFound(COURSE_NOT_FOUND)
            }
            other => Self::Store(other),
        }
    }
}

/// Record service over an injected store
pub struct RecordService<'a> {
    store: &'a dyn RecordStore,
}

impl<'a> RecordService<'a> {
    pub fn new(store: &'a dyn RecordStore) -> Self {
        Self { store }
    }

    /// Create a student; a taken email is a conflict.
    pub async fn create_student(&self, student: NewStudent) -> Result<Student, ServiceError> {
        let created = self
            .store
            .insert_student(&student)
            .await
            .map_err(ServiceError::from)
            .inspect_err(|err| log_rejection("create_student", err))?;

        tracing::info!(student_id = created.student_id, "Student created");
        Ok(created)
    }

    pub async fn list_students(&self, page: Pagination) -> Result<Vec<Student>, ServiceError> {
        Ok(self.store.list_students(page).await?)
    }

    pub async fn get_student(&self, student_id: i64) -> Result<Student, ServiceError> {
        self.store
            .fetch_student(student_id)
            .await?
            .ok_or(ServiceError::NotFound(STUDENT_NOT_FOUND))
    }

    /// Replace every mutable field of a student.
    pub async fn update_student(
        &self,
        student_id: i64,
        student: NewStudent,
    ) -> Result<Student, ServiceError> {
        let updated = self
            .store
            .update_student(student_id, &student)
            .await
            .map_err(ServiceError::from)
            .inspect_err(|err| log_rejection("update_student", err))?
            .ok_or(ServiceError::NotFound(STUDENT_NOT_FOUND))?;

        tracing::info!(student_id, "Student updated");
        Ok(updated)
    }

    pub async fn delete_student(&self, student_id: i64) -> Result<(), ServiceError> {
        if self.store.delete_student(student_id).await? == 0 {
            return Err(ServiceError::NotFound(STUDENT_NOT_FOUND));
        }

        tracing::info!(student_id, "Student deleted");
        Ok(())
    }

    /// Create a course; a taken course code is a conflict.
    pub async fn create_course(&self, course: NewCourse) -> Result<Course, ServiceError> {
        let created = self
            .store
            .insert_course(&course)
            .await
            .map_err(ServiceError::from)
            .inspect_err(|err| log_rejection("create_course", err))?;

        tracing::info!(course_id = created.course_id, code = %created.course_code, "Course created");
        Ok(created)
    }

    pub async fn list_courses(&self, page: Pagination) -> Result<Vec<Course>, ServiceError> {
        Ok(self.store.list_courses(page).await?)
    }

    /// Enroll a student in a course.
    ///
    /// The student is checked before the course, so a request naming two
    /// missing records reports the student. The checks only produce the
    /// friendlier error early: the insert can still hit the store's
    /// constraints when a concurrent request wins, and those are mapped to
    /// the same errors.
    pub async fn create_enrollment(
        &self,
        enrollment: NewEnrollment,
    ) -> Result<Enrollment, ServiceError> {
        if !self.store.student_exists(enrollment.student_id).await? {
            tracing::debug!(student_id = enrollment.student_id, "Enrollment for unknown student");
            return Err(ServiceError::NotFound(STUDENT_NOT_FOUND));
        }

        if !self.store.course_exists(enrollment.course_id).await? {
            tracing::debug!(course_id = enrollment.course_id, "Enrollment for unknown course");
            return Err(ServiceError::NotFound(COURSE_NOT_FOUND));
        }

        let created = self
            .store
            .insert_enrollment(&enrollment)
            .await
            .map_err(ServiceError::from)
            .inspect_err(|err| log_rejection("create_enrollment", err))?;

        tracing::info!(
            enrollment_id = created.enrollment_id,
            student_id = created.student_id,
            course_id = created.course_id,
            "Enrollment created"
        );
        Ok(created)
    }

    pub async fn list_enrollments(
        &self,
        page: Pagination,
    ) -> Result<Vec<Enrollment>, ServiceError> {
        Ok(self.store.list_enrollments(page).await?)
    }

    /// Courses a student is enrolled in. An unknown student yields an
    /// empty list, not `NotFound`.
    pub async fn get_student_courses(&self, student_id: i64) -> Result<Vec<Course>, ServiceError> {
        Ok(self.store.courses_for_student(student_id).await?)
    }

    /// Students enrolled in a course. An unknown course yields an empty
    /// list, not `NotFound`.
    pub async fn get_course_students(&self, course_id: i64) -> Result<Vec<Student>, ServiceError> {
        Ok(self.store.students_for_course(course_id).await?)
    }
}

fn log_rejection(operation: &'static str, err: &ServiceError) {
    match err {
        ServiceError::Conflict(reason) | ServiceError::NotFound(reason) => {
            tracing::warn!(operation, reason, "Write rejected");
        }
        ServiceError::Store(_) => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;

    fn student(email: &str) -> NewStudent {
        NewStudent::new("Alan", "Turing", email, None).unwrap()
    }

    fn course(code: &str) -> NewCourse {
        NewCourse::new("Computability", code, 3, None).unwrap()
    }

    #[tokio::test]
    async fn duplicate_email_is_conflict() {
        let store = MemoryStore::new();
        let service = RecordService::new(&store);

        service.create_student(student("alan@example.com")).await.unwrap();
        let err = service
            .create_student(student("alan@example.com"))
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::Conflict(EMAIL_EXISTS)));
    }

    #[tokio::test]
    async fn update_to_taken_email_is_conflict() {
        let store = MemoryStore::new();
        let service = RecordService::new(&store);

        let alan = service.create_student(student("alan@example.com")).await.unwrap();
        service.create_student(student("alonzo@example.com")).await.unwrap();

        let err = service
            .update_student(alan.student_id, student("alonzo@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(EMAIL_EXISTS)));
    }

    #[tokio::test]
    async fn missing_student_reported_before_missing_course() {
        let store = MemoryStore::new();
        let service = RecordService::new(&store);

        let err = service
            .create_enrollment(NewEnrollment::new(42, 43, None).unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(STUDENT_NOT_FOUND)));

        let alan = service.create_student(student("alan@example.com")).await.unwrap();
        let err = service
            .create_enrollment(NewEnrollment::new(alan.student_id, 43, None).unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(COURSE_NOT_FOUND)));
    }

    #[tokio::test]
    async fn duplicate_enrollment_is_conflict() {
        let store = MemoryStore::new();
        let service = RecordService::new(&store);

        let alan = service.create_student(student("alan@example.com")).await.unwrap();
        let cs = service.create_course(course("CS101")).await.unwrap();
        let pair = NewEnrollment::new(alan.student_id, cs.course_id, None).unwrap();

        service.create_enrollment(pair.clone()).await.unwrap();
        let err = service.create_enrollment(pair).await.unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(ALREADY_ENROLLED)));
    }

    #[test]
    fn constraint_races_map_to_domain_errors() {
        let err = ServiceError::from(DbError::ForeignKeyViolation(ForeignKey::EnrollmentStudent));
        assert!(matches!(err, ServiceError::NotFound(STUDENT_NOT_FOUND)));

        let err = ServiceError::from(DbError::UniqueViolation(UniqueKey::EnrollmentPair));
        assert!(matches!(err, ServiceError::Conflict(ALREADY_ENROLLED)));

        let err = ServiceError::from(DbError::Sqlx(sqlx::Error::PoolTimedOut));
        assert!(matches!(err, ServiceError::Store(_)));
    }

    #[tokio::test]
    async fn delete_twice() {
        let store = MemoryStore::new();
        let service = RecordService::new(&store);

        let alan = service.create_student(student("alan@example.com")).await.unwrap();
        service.delete_student(alan.student_id).await.unwrap();
        let err = service.delete_student(alan.student_id).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(STUDENT_NOT_FOUND)));
    }

    #[tokio::test]
    async fn relationship_queries_skip_parent_check() {
        let store = MemoryStore::new();
        let service = RecordService::new(&store);

        assert!(service.get_student_courses(999).await.unwrap().is_empty());
        assert!(service.get_course_students(999).await.unwrap().is_empty());
    }
}
