//! API route definitions.

use axum::{Json, Router, http::StatusCode, response::IntoResponse, response::Response};
use sasper_shared::AppError;
use serde_json::json;
use tracing::{debug, error};

use crate::AppState;

pub mod analysis;
pub mod budgets;
pub mod health;

/// Creates the API router with all routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(budgets::routes())
        .merge(analysis::routes())
}

/// Renders an application error as `{ "error": message }` with its status.
pub(crate) fn error_response(err: &AppError) -> Response {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    if err.is_client_error() {
        debug!(code = err.error_code(), error = %err, "Request rejected");
    } else {
        error!(code = err.error_code(), error = %err, "Request failed");
    }

    (status, Json(json!({ "error": err.to_string() }))).into_response()
}
