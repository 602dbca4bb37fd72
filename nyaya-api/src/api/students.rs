//! Student volunteer administration

use axum::{extract::State, Json};
use nyaya_common::db;
use nyaya_common::models::{Case, MessageResponse, NewStudent, Student};
use nyaya_common::validation::is_valid_email;
use tracing::info;
use uuid::Uuid;

use super::require_text;
use crate::extract::{ApiJson, ApiPath};
use crate::{ApiError, ApiResult, AppState};

/// POST /api/students
pub async fn create_student(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<NewStudent>,
) -> ApiResult<Json<Student>> {
    require_text("name", &input.name)?;
    require_text("email", &input.email)?;
    require_text("college", &input.college)?;
    if !is_valid_email(&input.email) {
        return Err(ApiError::BadRequest(format!("Invalid email: {}", input.email)));
    }

    let input = NewStudent {
        name: input.name.trim().to_string(),
        email: input.email.trim().to_string(),
        college: input.college.trim().to_string(),
        skills: input
            .skills
            .into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect(),
    };

    let student = input.into_student();
    db::insert_student(&state.db, &student).await?;
    info!("✓ Student registered: {}", student.id);

    Ok(Json(student))
}

/// GET /api/students
pub async fn list_students(State(state): State<AppState>) -> ApiResult<Json<Vec<Student>>> {
    Ok(Json(db::list_students(&state.db).await?))
}

/// GET /api/students/:id
pub async fn get_student(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<Json<Student>> {
    Ok(Json(db::get_student(&state.db, id).await?))
}

/// DELETE /api/students/:id
pub async fn delete_student(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<Json<MessageResponse>> {
    db::delete_student(&state.db, id).await?;
    info!("✓ Student deleted: {}", id);

    Ok(Json(MessageResponse::new("Student deleted successfully")))
}

/// GET /api/students/:id/assigned-cases
pub async fn student_cases(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<Json<Vec<Case>>> {
    Ok(Json(db::cases_for_student(&state.db, id).await?))
}
