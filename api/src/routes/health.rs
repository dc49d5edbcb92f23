use axum::{Json, Router, http::StatusCode, response::IntoResponse, routing::get};
use serde_json::json;

use crate::response::ApiResponse;
use common::state::AppState;

pub fn health_routes() -> Router<AppState> {
    Router::new().route("/", get(health))
}

/// GET /api/health
///
/// Liveness probe; carries no store access.
async fn health() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(ApiResponse::success(
            json!({ "status": "ok" }),
            "Service is healthy",
        )),
    )
}
