//! Enrollment endpoints

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::http::error::ApiError;
use crate::http::extractors::{ValidJson, ValidPagination};
use crate::models::{Enrollment, NewEnrollment};
use crate::service::RecordService;
use crate::state::AppState;

/// Create enrollment request
#[derive(Debug, Deserialize)]
pub struct EnrollmentCreate {
    pub student_id: i64,
    pub course_id: i64,
    pub grade: Option<String>,
}

/// Enrollment response
#[derive(Debug, Serialize, Deserialize)]
pub struct EnrollmentResponse {
    pub enrollment_id: i64,
    pub student_id: i64,
    pub course_id: i64,
    pub grade: Option<String>,
    pub enrollment_date: NaiveDate,
}

impl From<Enrollment> for EnrollmentResponse {
    fn from(e: Enrollment) -> Self {
        Self {
            enrollment_id: e.enrollment_id,
            student_id: e.student_id,
            course_id: e.course_id,
            grade: e.grade,
            enrollment_date: e.enrollment_date,
        }
    }
}

/// POST /enrollments/ - enroll a student in a course
async fn create_enrollment(
    State(state): State<AppState>,
    ValidJson(req): ValidJson<EnrollmentCreate>,
) -> Result<(StatusCode, Json<EnrollmentResponse>), ApiError> {
    let enrollment = NewEnrollment::new(req.student_id, req.course_id, req.grade.as_deref())?;
    let created = RecordService::new(state.store())
        .create_enrollment(enrollment)
        .await?;

    Ok((StatusCode::CREATED, Json(EnrollmentResponse::from(created))))
}

/// GET /enrollments/ - list enrollments
async fn list_enrollments(
    State(state): State<AppState>,
    ValidPagination(page): ValidPagination,
) -> Result<Json<Vec<EnrollmentResponse>>, ApiError> {
    let enrollments = RecordService::new(state.store())
        .list_enrollments(page)
        .await?;
    Ok(Json(enrollments.into_iter().map(EnrollmentResponse::from).collect()))
}

/// Enrollment routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/enrollments", get(list_enrollments).post(create_enrollment))
        .route("/enrollments/", get(list_enrollments).post(create_enrollment))
}
