//! Case administration and assignment

use axum::{extract::State, Json};
use nyaya_common::db;
use nyaya_common::models::{Case, CaseUpdate, MessageResponse, NewCase};
use tracing::info;
use uuid::Uuid;

use super::require_text;
use crate::extract::{ApiJson, ApiPath};
use crate::{ApiResult, AppState};

/// POST /api/cases
pub async fn create_case(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<NewCase>,
) -> ApiResult<Json<Case>> {
    require_text("title", &input.title)?;
    require_text("description", &input.description)?;
    require_text("category", &input.category)?;

    let case = NewCase {
        title: input.title.trim().to_string(),
        description: input.description.trim().to_string(),
        category: input.category.trim().to_string(),
    }
    .into_case();

    db::insert_case(&state.db, &case).await?;
    info!("✓ Case created: {}", case.id);

    Ok(Json(case))
}

/// GET /api/cases
pub async fn list_cases(State(state): State<AppState>) -> ApiResult<Json<Vec<Case>>> {
    Ok(Json(db::list_cases(&state.db).await?))
}

/// GET /api/cases/:id
pub async fn get_case(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<Json<Case>> {
    Ok(Json(db::get_case(&state.db, id).await?))
}

/// PATCH|PUT /api/cases/:id
pub async fn update_case(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(update): ApiJson<CaseUpdate>,
) -> ApiResult<Json<Case>> {
    let case = db::update_case(&state.db, id, update).await?;
    info!("✓ Case updated: {} ({})", case.id, case.status);

    Ok(Json(case))
}

/// DELETE /api/cases/:id
pub async fn delete_case(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<Json<MessageResponse>> {
    db::delete_case(&state.db, id).await?;
    info!("✓ Case deleted: {}", id);

    Ok(Json(MessageResponse::new("Case deleted successfully")))
}
