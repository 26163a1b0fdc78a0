//! AI financial analysis route.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use sasper_core::analysis::AnalysisError;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::AppState;

/// Creates the analysis routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/api/analisis-financiero", get(financial_analysis))
}

/// Query parameters for the analysis endpoint.
#[derive(Debug, Deserialize)]
pub struct AnalysisQuery {
    /// User to analyze.
    pub user_id: Option<String>,
}

async fn financial_analysis(
    State(state): State<AppState>,
    Query(query): Query<AnalysisQuery>,
) -> impl IntoResponse {
    let user_id = query.user_id.unwrap_or_default();

    match state.analysis.analyze(&user_id).await {
        Ok(analysis) => (StatusCode::OK, Json(json!({ "analisis": analysis }))).into_response(),
        Err(AnalysisError::InvalidRequest(msg)) => {
            debug!(error = %msg, "Rejected analysis request");
            (StatusCode::BAD_REQUEST, Json(json!({ "detail": msg }))).into_response()
        }
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "detail": format!("analysis could not be completed: {e}") })),
        )
            .into_response(),
    }
}
