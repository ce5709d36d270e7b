use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Overall service status.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Whether the application storage root exists.
    pub storage_ready: bool,
}

#[derive(Serialize)]
pub struct GreetingResponse {
    pub message: &'static str,
}

/// GET /health -- returns service and storage health.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let storage_ready = state.applications.is_ready().await;

    let status = if storage_ready { "ok" } else { "degraded" };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        storage_ready,
    })
}

/// GET /test -- liveness greeting kept for existing monitors.
async fn greeting() -> Json<GreetingResponse> {
    Json(GreetingResponse {
        message: "Hello from api.sjaplus.top",
    })
}

/// Mount health check routes at the root level.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/test", get(greeting))
}
