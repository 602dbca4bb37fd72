//! HTTP API handlers for nyaya-api

pub mod cases;
pub mod documents;
pub mod health;
pub mod queries;
pub mod seed;
pub mod students;
pub mod voice;

pub use health::{health_routes, root_routes};

use crate::AppState;
use axum::routing::{get, post};
use axum::Router;

/// Routes mounted under `/api`
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        // Query guidance
        .route("/queries", post(queries::create_query).get(queries::list_queries))
        .route("/queries/:id", get(queries::get_query))
        .route("/text-query", post(queries::text_query))
        // Voice
        .route("/voice-to-text", post(voice::voice_to_text))
        .route("/voice-query", post(voice::voice_query))
        .route("/text-to-speech", post(voice::text_to_speech))
        // Documents
        .route("/documents", post(documents::create_document))
        .route("/documents/:id", get(documents::get_document))
        // Administration
        .route("/students", post(students::create_student).get(students::list_students))
        .route(
            "/students/:id",
            get(students::get_student).delete(students::delete_student),
        )
        .route("/students/:id/assigned-cases", get(students::student_cases))
        .route("/cases", post(cases::create_case).get(cases::list_cases))
        .route(
            "/cases/:id",
            get(cases::get_case)
                .patch(cases::update_case)
                .put(cases::update_case)
                .delete(cases::delete_case),
        )
        .route("/seed", post(seed::seed_data))
}

/// Reject blank required fields with a 400 naming the field
pub(crate) fn require_text(field: &str, value: &str) -> crate::ApiResult<()> {
    if value.trim().is_empty() {
        return Err(crate::ApiError::BadRequest(format!("{} is required", field)));
    }
    Ok(())
}
