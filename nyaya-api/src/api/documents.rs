//! FIR/RTI document generation

use axum::{extract::State, Json};
use nyaya_common::db;
use nyaya_common::models::{now_timestamp, DocType, LegalDocument, NewDocument};
use tracing::info;
use uuid::Uuid;

use crate::extract::{ApiJson, ApiPath};
use crate::legal::render_document;
use crate::{ApiError, ApiResult, AppState};

/// POST /api/documents
pub async fn create_document(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<NewDocument>,
) -> ApiResult<Json<LegalDocument>> {
    let doc_type: DocType = input.doc_type.parse().map_err(ApiError::BadRequest)?;

    let document = LegalDocument {
        id: Uuid::new_v4(),
        doc_type,
        language: input.language,
        content: render_document(doc_type, input.language, &input.details),
        created_at: now_timestamp(),
    };

    db::insert_document(&state.db, &document).await?;
    info!("✓ Document generated: {} ({})", doc_type, input.language);

    Ok(Json(document))
}

/// GET /api/documents/:id
pub async fn get_document(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<Json<LegalDocument>> {
    Ok(Json(db::get_document(&state.db, id).await?))
}
