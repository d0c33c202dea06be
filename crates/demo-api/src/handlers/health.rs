use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use crate::response::ApiResponse;
use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
    name: String,
    version: String,
}

/// Health check - GET /health
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<ApiResponse<HealthResponse>>) {
    (
        StatusCode::OK,
        Json(ApiResponse::success(HealthResponse {
            status: "healthy".to_string(),
            name: state.config.app.name.clone(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        })),
    )
}
