//! Course endpoints

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::{Deserialize, Serialize};

use super::students::StudentResponse;
use crate::http::error::ApiError;
use crate::http::extractors::{RecordId, ValidJson, ValidPagination};
use crate::models::{Course, NewCourse};
use crate::service::RecordService;
use crate::state::AppState;

/// Create course request
#[derive(Debug, Deserialize)]
pub struct CourseCreate {
    pub course_name: String,
    pub course_code: String,
    pub credit_hours: i32,
    pub department: Option<String>,
}

/// Course response
#[derive(Debug, Serialize, Deserialize)]
pub struct CourseResponse {
    pub course_id: i64,
    pub course_name: String,
    pub course_code: String,
    pub credit_hours: i32,
    pub department: Option<String>,
}

impl From<Course> for CourseResponse {
    fn from(c: Course) -> Self {
        Self {
            course_id: c.course_id,
            course_name: c.course_name,
            course_code: c.course_code,
            credit_hours: c.credit_hours,
            department: c.department,
        }
    }
}

/// POST /courses/ - create a course
async fn create_course(
    State(state): State<AppState>,
    ValidJson(req): ValidJson<CourseCreate>,
) -> Result<(StatusCode, Json<CourseResponse>), ApiError> {
    let course = NewCourse::new(
        &req.course_name,
        &req.course_code,
        req.credit_hours,
        req.department.as_deref(),
    )?;
    let created = RecordService::new(state.store()).create_course(course).await?;

    Ok((StatusCode::CREATED, Json(CourseResponse::from(created))))
}

/// GET /courses/ - list courses
async fn list_courses(
    State(state): State<AppState>,
    ValidPagination(page): ValidPagination,
) -> Result<Json<Vec<CourseResponse>>, ApiError> {
    let courses = RecordService::new(state.store()).list_courses(page).await?;
    Ok(Json(courses.into_iter().map(CourseResponse::from).collect()))
}

/// GET /courses/{id}/students - students enrolled in the course
async fn get_course_students(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> Result<Json<Vec<StudentResponse>>, ApiError> {
    let students = RecordService::new(state.store())
        .get_course_students(id)
        .await?;
    Ok(Json(students.into_iter().map(StudentResponse::from).collect()))
}

/// Course routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/courses", get(list_courses).post(create_course))
        .route("/courses/", get(list_courses).post(create_course))
        .route("/courses/{id}/students", get(get_course_students))
}
