//! Health check endpoint

use axum::{routing::get, Json, Router};
use nyaya_common::models::{HealthResponse, MessageResponse};

use crate::AppState;

/// GET /health and GET /api/health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        module: "nyaya-api".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// GET /
pub async fn root() -> Json<MessageResponse> {
    Json(MessageResponse::new("Legal Aid API running"))
}

/// Build health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

pub fn root_routes() -> Router<AppState> {
    Router::new().route("/", get(root))
}
