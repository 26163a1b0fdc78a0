//! Budget check route.

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::post,
};
use chrono::Utc;
use sasper_core::budget::CheckBudgetRequest;
use sasper_shared::AppError;

use super::error_response;
use crate::AppState;

/// Creates the budget routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/check-budget-on-transaction", post(check_budget_on_transaction))
}

/// Checks the category budget after a transaction was recorded.
///
/// Any body that is not a JSON `{ user_id, category }` object is a 400.
async fn check_budget_on_transaction(
    State(state): State<AppState>,
    payload: Result<Json<CheckBudgetRequest>, JsonRejection>,
) -> impl IntoResponse {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            return error_response(&AppError::Validation(rejection.body_text()));
        }
    };

    let today = Utc::now().date_naive();
    match state.budget_check.check_on_transaction(&request, today).await {
        Ok(outcome) => (StatusCode::OK, Json(outcome)).into_response(),
        Err(e) => error_response(&AppError::from(e)),
    }
}
