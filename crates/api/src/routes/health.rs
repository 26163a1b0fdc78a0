//! Liveness and health check endpoints.

use axum::{Json, Router, routing::get};
use serde::Serialize;

use crate::AppState;

/// Liveness banner response.
#[derive(Serialize)]
pub struct RootResponse {
    /// Always `ok`.
    pub status: &'static str,
    /// Banner text.
    pub message: &'static str,
}

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: &'static str,
    /// Service version.
    pub version: &'static str,
}

async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        status: "ok",
        message: "SasPer personal finance server is running.",
    })
}

/// Health check handler.
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Creates liveness and health routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
}
