//! Legal query endpoints
//!
//! A query is classified by keyword, answered from the guidance table in the
//! requested language, and stored so it can be fetched again by id.

use axum::{extract::State, Json};
use nyaya_common::db;
use nyaya_common::models::{
    now_timestamp, Language, LegalQuery, NewQuery, TextQueryRequest, TextQueryResponse,
};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::legal::{classify_query, guidance};
use crate::{ApiError, ApiResult, AppState};

/// Classify, answer and persist a query
pub(crate) async fn answer_and_store(
    state: &AppState,
    query_text: &str,
    language: Language,
) -> ApiResult<LegalQuery> {
    let category = classify_query(query_text);
    let query = LegalQuery {
        id: Uuid::new_v4(),
        query_text: query_text.to_string(),
        detected_language: language,
        category,
        response_text: guidance(category, language).to_string(),
        created_at: now_timestamp(),
    };

    db::insert_query(&state.db, &query).await?;
    info!("✓ Query created: {} ({})", category, language);

    Ok(query)
}

/// POST /api/queries
pub async fn create_query(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<NewQuery>,
) -> ApiResult<Json<LegalQuery>> {
    let query_text = input.query_text.trim();
    if query_text.is_empty() {
        return Err(ApiError::BadRequest("Query cannot be empty".to_string()));
    }

    let query = answer_and_store(&state, query_text, input.language).await?;
    Ok(Json(query))
}

/// POST /api/text-query
///
/// Stateless variant returning only the answer.
pub async fn text_query(
    ApiJson(input): ApiJson<TextQueryRequest>,
) -> ApiResult<Json<TextQueryResponse>> {
    let query_text = input.query.trim();
    if query_text.is_empty() {
        return Err(ApiError::BadRequest("Query cannot be empty".to_string()));
    }

    let category = classify_query(query_text);
    Ok(Json(TextQueryResponse {
        answer: guidance(category, input.language).to_string(),
    }))
}

/// GET /api/queries/:id
pub async fn get_query(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<Json<LegalQuery>> {
    Ok(Json(db::get_query(&state.db, id).await?))
}

#[derive(Debug, Deserialize)]
pub struct ListQueriesParams {
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    20
}

/// GET /api/queries?limit=N
pub async fn list_queries(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<ListQueriesParams>,
) -> ApiResult<Json<Vec<LegalQuery>>> {
    Ok(Json(db::list_queries(&state.db, params.limit).await?))
}
