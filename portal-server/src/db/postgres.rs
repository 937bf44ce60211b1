//! PostgreSQL record store
//!
//! Every statement runs against the pool directly, so a connection is
//! checked out for exactly one query and returned when it completes or fails.

use async_trait::async_trait;
use sqlx::PgPool;

use super::{DbError, RecordStore};
use crate::models::{
    Course, Enrollment, NewCourse, NewEnrollment, NewStudent, Pagination, Student,
};

/// Record store backed by a sqlx connection pool
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl RecordStore for PgStore {
    async fn ping(&self) -> Result<(), DbError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(DbError::from_sqlx)?;
        Ok(())
    }

    async fn insert_student(&self, student: &NewStudent) -> Result<Student, DbError> {
        sqlx::query_as(
            r#"
            INSERT INTO students (first_name, last_name, email, date_of_birth)
            VALUES ($1, $2, $3, $4)
            RETURNING student_id, first_name, last_name, email, date_of_birth, created_at
            "#,
        )
        .bind(&student.first_name)
        .bind(&student.last_name)
        .bind(student.email.as_str())
        .bind(student.date_of_birth)
        .fetch_one(&self.pool)
        .await
        .map_err(DbError::from_sqlx)
    }

    async fn list_students(&self, page: Pagination) -> Result<Vec<Student>, DbError> {
        sqlx::query_as(
            r#"
            SELECT student_id, first_name, last_name, email, date_of_birth, created_at
            FROM students
            ORDER BY student_id
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(DbError::from_sqlx)
    }

    async fn fetch_student(&self, student_id: i64) -> Result<Option<Student>, DbError> {
        sqlx::query_as(
            r#"
            SELECT student_id, first_name, last_name, email, date_of_birth, created_at
            FROM students
            WHERE student_id = $1
            "#,
        )
        .bind(student_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(DbError::from_sqlx)
    }

    async fn update_student(
        &self,
        student_id: i64,
        student: &NewStudent,
    ) -> Result<Option<Student>, DbError> {
        sqlx::query_as(
            r#"
            UPDATE students
            SET first_name = $1, last_name = $2, email = $3, date_of_birth = $4
            WHERE student_id = $5
            RETURNING student_id, first_name, last_name, email, date_of_birth, created_at
            "#,
        )
        .bind(&student.first_name)
        .bind(&student.last_name)
        .bind(student.email.as_str())
        .bind(student.date_of_birth)
        .bind(student_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(DbError::from_sqlx)
    }

    async fn delete_student(&self, student_id: i64) -> Result<u64, DbError> {
        let result = sqlx::query("DELETE FROM students WHERE student_id = $1")
            .bind(student_id)
            .execute(&self.pool)
            .await
            .map_err(DbError::from_sqlx)?;

        Ok(result.rows_affected())
    }

    async fn student_exists(&self, student_id: i64) -> Result<bool, DbError> {
        let exists: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM students WHERE student_id = $1)")
                .bind(student_id)
                .fetch_one(&self.pool)
                .await
                .map_err(DbError::from_sqlx)?;

        Ok(exists.0)
    }

    async fn insert_course(&self, course: &NewCourse) -> Result<Course, DbError> {
        sqlx::query_as(
            r#"
            INSERT INTO courses (course_name, course_code, credit_hours, department)
            VALUES ($1, $2, $3, $4)
            RETURNING course_id, course_name, course_code, credit_hours, department
            "#,
        )
        .bind(&course.course_name)
        .bind(&course.course_code)
        .bind(course.credit_hours)
        .bind(course.department.as_deref())
        .fetch_one(&self.pool)
        .await
        .map_err(DbError::from_sqlx)
    }

    async fn list_courses(&self, page: Pagination) -> Result<Vec<Course>, DbError> {
        sqlx::query_as(
            r#"
            SELECT course_id, course_name, course_code, credit_hours, department
            FROM courses
            ORDER BY course_id
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(DbError::from_sqlx)
    }

    async fn course_exists(&self, course_id: i64) -> Result<bool, DbError> {
        let exists: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM courses WHERE course_id = $1)")
                .bind(course_id)
                .fetch_one(&self.pool)
                .await
                .map_err(DbError::from_sqlx)?;

        Ok(exists.0)
    }

    async fn insert_enrollment(
        &self,
        enrollment: &NewEnrollment,
    ) -> Result<Enrollment, DbError> {
        sqlx::query_as(
            r#"
            INSERT INTO enrollments (student_id, course_id, grade)
            VALUES ($1, $2, $3)
            RETURNING enrollment_id, student_id, course_id, grade, enrollment_date
            "#,
        )
        .bind(enrollment.student_id)
        .bind(enrollment.course_id)
        .bind(enrollment.grade.as_deref())
        .fetch_one(&self.pool)
        .await
        .map_err(DbError::from_sqlx)
    }

    async fn list_enrollments(&self, page: Pagination) -> Result<Vec<Enrollment>, DbError> {
        sqlx::query_as(
            r#"
            SELECT enrollment_id, student_id, course_id, grade, enrollment_date
            FROM enrollments
            ORDER BY enrollment_id
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(DbError::from_sqlx)
    }

    async fn courses_for_student(&self, student_id: i64) -> Result<Vec<Course>, DbError> {
        sqlx::query_as(
            r#"
            SELECT c.course_id, c.course_name, c.course_code, c.credit_hours, c.department
            FROM courses c
            JOIN enrollments e ON e.course_id = c.course_id
            WHERE e.student_id = $1
            ORDER BY c.course_id
            "#,
        )
        .bind(student_id)
        .fetch_all(&self.pool)
        .await
        .map_err(DbError::from_sqlx)
    }

    async fn students_for_course(&self, course_id: i64) -> Result<Vec<Student>, DbError> {
        sqlx::query_as(
            r#"
            SELECT s.student_id, s.first_name, s.last_name, s.email, s.date_of_birth, s.created_at
            FROM students s
            JOIN enrollments e ON e.student_id = s.student_id
            WHERE e.course_id = $1
            ORDER BY s.student_id
            "#,
        )
        .bind(course_id)
        .fetch_all(&self.pool)
        .await
        .map_err(DbError::from_sqlx)
    }
}
