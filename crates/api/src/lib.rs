//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - The budget check endpoint called after a transaction is recorded
//! - The AI financial analysis endpoint
//! - Liveness and health endpoints

pub mod routes;

use std::sync::Arc;

use axum::Router;
use sasper_core::analysis::AnalysisService;
use sasper_core::budget::BudgetCheckService;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Budget threshold check.
    pub budget_check: Arc<BudgetCheckService>,
    /// Financial analysis.
    pub analysis: Arc<AnalysisService>,
}

impl AppState {
    /// Creates the state from its services.
    #[must_use]
    pub fn new(budget_check: BudgetCheckService, analysis: AnalysisService) -> Self {
        Self {
            budget_check: Arc::new(budget_check),
            analysis: Arc::new(analysis),
        }
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
