//! Student endpoints

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::courses::CourseResponse;
use crate::http::error::ApiError;
use crate::http::extractors::{RecordId, ValidJson, ValidPagination};
use crate::models::{NewStudent, Student};
use crate::service::RecordService;
use crate::state::AppState;

/// Create/replace student request
#[derive(Debug, Deserialize)]
pub struct StudentCreate {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub date_of_birth: Option<NaiveDate>,
}

impl TryFrom<StudentCreate> for NewStudent {
    type Error = crate::models::ValidationError;

    fn try_from(req: StudentCreate) -> Result<Self, Self::Error> {
        NewStudent::new(&req.first_name, &req.last_name, &req.email, req.date_of_birth)
    }
}

/// Student response
#[derive(Debug, Serialize, Deserialize)]
pub struct StudentResponse {
    pub student_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub date_of_birth: Option<NaiveDate>,
    pub created_at: String,
}

impl From<Student> for StudentResponse {
    fn from(s: Student) -> Self {
        Self {
            student_id: s.student_id,
            first_name: s.first_name,
            last_name: s.last_name,
            email: s.email,
            date_of_birth: s.date_of_birth,
            created_at: s.created_at.to_rfc3339(),
        }
    }
}

/// POST /students/ - create a student
async fn create_student(
    State(state): State<AppState>,
    ValidJson(req): ValidJson<StudentCreate>,
) -> Result<(StatusCode, Json<StudentResponse>), ApiError> {
    let student = NewStudent::try_from(req)?;
    let created = RecordService::new(state.store())
        .create_student(student)
        .await?;

    Ok((StatusCode::CREATED, Json(StudentResponse::from(created))))
}

/// GET /students/ - list students
async fn list_students(
    State(state): State<AppState>,
    ValidPagination(page): ValidPagination,
) -> Result<Json<Vec<StudentResponse>>, ApiError> {
    let students = RecordService::new(state.store()).list_students(page).await?;
    Ok(Json(students.into_iter().map(StudentResponse::from).collect()))
}

/// GET /students/{id} - get a single student
async fn get_student(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> Result<Json<StudentResponse>, ApiError> {
    let student = RecordService::new(state.store()).get_student(id).await?;
    Ok(Json(StudentResponse::from(student)))
}

/// PUT /students/{id} - replace a student's fields
async fn update_student(
    State(state): State<AppState>,
    RecordId(id): RecordId,
    ValidJson(req): ValidJson<StudentCreate>,
) -> Result<Json<StudentResponse>, ApiError> {
    let student = NewStudent::try_from(req)?;
    let updated = RecordService::new(state.store())
        .update_student(id, student)
        .await?;

    Ok(Json(StudentResponse::from(updated)))
}

/// DELETE /students/{id} - delete a student
async fn delete_student(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> Result<StatusCode, ApiError> {
    RecordService::new(state.store()).delete_student(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /students/{id}/courses - courses the student is enrolled in
async fn get_student_courses(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> Result<Json<Vec<CourseResponse>>, ApiError> {
    let courses = RecordService::new(state.store())
        .get_student_courses(id)
        .await?;
    Ok(Json(courses.into_iter().map(CourseResponse::from).collect()))
}

/// Student routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/students", get(list_students).post(create_student))
        .route("/students/", get(list_students).post(create_student))
        .route(
            "/students/{id}",
            get(get_student).put(update_student).delete(delete_student),
        )
        .route("/students/{id}/courses", get(get_student_courses))
}
