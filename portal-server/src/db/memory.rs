//! In-memory record store
//!
//! Mirrors the PostgreSQL schema's constraints (unique email, unique course
//! code, unique enrollment pair, enrollment foreign keys with cascade on
//! student delete). Used by tests and by `portal serve --in-memory`.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::{DbError, ForeignKey, RecordStore, UniqueKey};
use crate::models::{
    Course, Enrollment, NewCourse, NewEnrollment, NewStudent, Pagination, Student,
};

/// A record store holding all tables in process memory.
///
/// # Thread Safety
///
/// All tables sit behind one `tokio::sync::RwLock`, so every write is
/// serialized and constraint checks cannot race with inserts.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

#[derive(Debug, Default)]
struct Tables {
    students: BTreeMap<i64, Student>,
    courses: BTreeMap<i64, Course>,
    enrollments: BTreeMap<i64, Enrollment>,
    last_student_id: i64,
    last_course_id: i64,
    last_enrollment_id: i64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Advance a sequence and return its new value (ids start at 1).
fn next_id(sequence: &mut i64) -> i64 {
    *sequence += 1;
    *sequence
}

/// Apply OFFSET/LIMIT to an id-ordered map.
fn page_of<T: Clone>(rows: &BTreeMap<i64, T>, page: Pagination) -> Vec<T> {
    let skip = usize::try_from(page.offset()).unwrap_or(usize::MAX);
    let take = usize::try_from(page.limit()).unwrap_or(usize::MAX);
    rows.values().skip(skip).take(take).cloned().collect()
}

impl Tables {
    fn email_taken(&self, email: &str, except: Option<i64>) -> bool {
        self.students
            .values()
            .any(|s| s.email == email && Some(s.student_id) != except)
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn ping(&self) -> Result<(), DbError> {
        Ok(())
    }

    async fn insert_student(&self, student: &NewStudent) -> Result<Student, DbError> {
        let mut tables = self.tables.write().await;

        if tables.email_taken(student.email.as_str(), None) {
            return Err(DbError::UniqueViolation(UniqueKey::StudentEmail));
        }

        let student_id = next_id(&mut tables.last_student_id);
        let record = Student {
            student_id,
            first_name: student.first_name.clone(),
            last_name: student.last_name.clone(),
            email: student.email.as_str().to_owned(),
            date_of_birth: student.date_of_birth,
            created_at: Utc::now(),
        };
        tables.students.insert(student_id, record.clone());
        Ok(record)
    }

    async fn list_students(&self, page: Pagination) -> Result<Vec<Student>, DbError> {
        Ok(page_of(&self.tables.read().await.students, page))
    }

    async fn fetch_student(&self, student_id: i64) -> Result<Option<Student>, DbError> {
        Ok(self.tables.read().await.students.get(&student_id).cloned())
    }

    async fn update_student(
        &self,
        student_id: i64,
        student: &NewStudent,
    ) -> Result<Option<Student>, DbError> {
        let mut tables = self.tables.write().await;

        if !tables.students.contains_key(&student_id) {
            return Ok(None);
        }

        if tables.email_taken(student.email.as_str(), Some(student_id)) {
            return Err(DbError::UniqueViolation(UniqueKey::StudentEmail));
        }

        let Some(record) = tables.students.get_mut(&student_id) else {
            return Ok(None);
        };
        record.first_name = student.first_name.clone();
        record.last_name = student.last_name.clone();
        record.email = student.email.as_str().to_owned();
        record.date_of_birth = student.date_of_birth;
        Ok(Some(record.clone()))
    }

    async fn delete_student(&self, student_id: i64) -> Result<u64, DbError> {
        let mut tables = self.tables.write().await;

        if tables.students.remove(&student_id).is_none() {
            return Ok(0);
        }

        // ON DELETE CASCADE
        tables.enrollments.retain(|_, e| e.student_id != student_id);
        Ok(1)
    }

    async fn student_exists(&self, student_id: i64) -> Result<bool, DbError> {
        Ok(self.tables.read().await.students.contains_key(&student_id))
    }

    async fn insert_course(&self, course: &NewCourse) -> Result<Course, DbError> {
        let mut tables = self.tables.write().await;

        if tables
            .courses
            .values()
            .any(|c| c.course_code == course.course_code)
        {
            return Err(DbError::UniqueViolation(UniqueKey::CourseCode));
        }

        let course_id = next_id(&mut tables.last_course_id);
        let record = Course {
            course_id,
            course_name: course.course_name.clone(),
            course_code: course.course_code.clone(),
            credit_hours: course.credit_hours,
            department: course.department.clone(),
        };
        tables.courses.insert(course_id, record.clone());
        Ok(record)
    }

    async fn list_courses(&self, page: Pagination) -> Result<Vec<Course>, DbError> {
        Ok(page_of(&self.tables.read().await.courses, page))
    }

    async fn course_exists(&self, course_id: i64) -> Result<bool, DbError> {
        Ok(self.tables.read().await.courses.contains_key(&course_id))
    }

    async fn insert_enrollment(
        &self,
        enrollment: &NewEnrollment,
    ) -> Result<Enrollment, DbError> {
        let mut tables = self.tables.write().await;

        if !tables.students.contains_key(&enrollment.student_id) {
            return Err(DbError::ForeignKeyViolation(ForeignKey::EnrollmentStudent));
        }
        if !tables.courses.contains_key(&enrollment.course_id) {
            return Err(DbError::ForeignKeyViolation(ForeignKey::EnrollmentCourse));
        }
        if tables.enrollments.values().any(|e| {
            e.student_id == enrollment.student_id && e.course_id == enrollment.course_id
        }) {
            return Err(DbError::UniqueViolation(UniqueKey::EnrollmentPair));
        }

        let enrollment_id = next_id(&mut tables.last_enrollment_id);
        let record = Enrollment {
            enrollment_id,
            student_id: enrollment.student_id,
            course_id: enrollment.course_id,
            grade: enrollment.grade.clone(),
            enrollment_date: Utc::now().date_naive(),
        };
        tables.enrollments.insert(enrollment_id, record.clone());
        Ok(record)
    }

    async fn list_enrollments(&self, page: Pagination) -> Result<Vec<Enrollment>, DbError> {
        Ok(page_of(&self.tables.read().await.enrollments, page))
    }

    async fn courses_for_student(&self, student_id: i64) -> Result<Vec<Course>, DbError> {
        let tables = self.tables.read().await;
        let mut courses: Vec<Course> = tables
            .enrollments
            .values()
            .filter(|e| e.student_id == student_id)
            .filter_map(|e| tables.courses.get(&e.course_id).cloned())
            .collect();
        courses.sort_by_key(|c| c.course_id);
        Ok(courses)
    }

    async fn students_for_course(&self, course_id: i64) -> Result<Vec<Student>, DbError> {
        let tables = self.tables.read().await;
        let mut students: Vec<Student> = tables
            .enrollments
            .values()
            .filter(|e| e.course_id == course_id)
            .filter_map(|e| tables.students.get(&e.student_id).cloned())
            .collect();
        students.sort_by_key(|s| s.student_id);
        Ok(students)
    }
}
