use axum::{routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers::{filters, health};
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Task-list filters
        .route("/api/v1/filters", get(filters::list_filters))
        .route("/api/v1/filters/{id}/tasks", get(filters::filter_tasks))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
