//! Router behaviour when the store is slow or unreachable

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use portal_server::db::{DbError, MemoryStore, RecordStore};
use portal_server::models::{
    Course, Enrollment, NewCourse, NewEnrollment, NewStudent, Pagination, Student,
};
use portal_server::{build_router, AppState, ServerConfig};

/// Delegates to a `MemoryStore`, except listing students stalls for
/// `list_delay` and `ping` fails when `reachable` is false.
struct FaultyStore {
    inner: MemoryStore,
    list_delay: Duration,
    reachable: bool,
}

impl FaultyStore {
    fn slow(list_delay: Duration) -> Self {
        Self {
            inner: MemoryStore::new(),
            list_delay,
            reachable: true,
        }
    }

    fn unreachable() -> Self {
        Self {
            inner: MemoryStore::new(),
            list_delay: Duration::ZERO,
            reachable: false,
        }
    }
}

#[async_trait]
impl RecordStore for FaultyStore {
    async fn ping(&self) -> Result<(), DbError> {
        if self.reachable {
            Ok(())
        } else {
            Err(DbError::Sqlx(sqlx::Error::PoolTimedOut))
        }
    }

    async fn insert_student(&self, student: &NewStudent) -> Result<Student, DbError> {
        self.inner.insert_student(student).await
    }

    async fn list_students(&self, page: Pagination) -> Result<Vec<Student>, DbError> {
        tokio::time::sleep(self.list_delay).await;
        self.inner.list_students(page).await
    }

    async fn fetch_student(&self, student_id: i64) -> Result<Option<Student>, DbError> {
        self.inner.fetch_student(student_id).await
    }

    async fn update_student(
        &self,
        student_id: i64,
        student: &NewStudent,
    ) -> Result<Option<Student>, DbError> {
        self.inner.update_student(student_id, student).await
    }

    async fn delete_student(&self, student_id: i64) -> Result<u64, DbError> {
        self.inner.delete_student(student_id).await
    }

    async fn student_exists(&self, student_id: i64) -> Result<bool, DbError> {
        self.inner.student_exists(student_id).await
    }

    async fn insert_course(&self, course: &NewCourse) -> Result<Course, DbError> {
        self.inner.insert_course(course).await
    }

    async fn list_courses(&self, page: Pagination) -> Result<Vec<Course>, DbError> {
        self.inner.list_courses(page).await
    }

    async fn course_exists(&self, course_id: i64) -> Result<bool, DbError> {
        self.inner.course_exists(course_id).await
    }

    async fn insert_enrollment(
        &self,
        enrollment: &NewEnrollment,
    ) -> Result<Enrollment, DbError> {
        self.inner.insert_enrollment(enrollment).await
    }

    async fn list_enrollments(&self, page: Pagination) -> Result<Vec<Enrollment>, DbError> {
        self.inner.list_enrollments(page).await
    }

    async fn courses_for_student(&self, student_id: i64) -> Result<Vec<Course>, DbError> {
        self.inner.courses_for_student(student_id).await
    }

    async fn students_for_course(&self, course_id: i64) -> Result<Vec<Student>, DbError> {
        self.inner.students_for_course(course_id).await
    }
}

fn app_with(store: FaultyStore, config: &ServerConfig) -> Router {
    build_router(AppState::new(Arc::new(store)), config)
}

async fn get(app: Router, uri: &str) -> (StatusCode, Vec<u8>) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, bytes.to_vec())
}

#[tokio::test(start_paused = true)]
async fn slow_store_times_out_with_408() {
    let config = ServerConfig {
        request_timeout: Duration::from_secs(5),
        ..ServerConfig::default()
    };
    let app = app_with(FaultyStore::slow(Duration::from_secs(60)), &config);

    let (status, _) = get(app, "/students/").await;
    assert_eq!(status, StatusCode::REQUEST_TIMEOUT);
}

#[tokio::test(start_paused = true)]
async fn store_within_timeout_answers() {
    let config = ServerConfig {
        request_timeout: Duration::from_secs(5),
        ..ServerConfig::default()
    };
    let app = app_with(FaultyStore::slow(Duration::from_secs(1)), &config);

    let (status, body) = get(app, "/students/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(serde_json::from_slice::<Value>(&body).unwrap(), Value::Array(vec![]));
}

#[tokio::test]
async fn unreachable_store_is_not_ready() {
    let app = app_with(FaultyStore::unreachable(), &ServerConfig::default());

    let (status, body) = get(app.clone(), "/health/ready").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["status"], "unavailable");

    // Liveness does not touch the store
    let (status, _) = get(app, "/health").await;
    assert_eq!(status, StatusCode::OK);
}
