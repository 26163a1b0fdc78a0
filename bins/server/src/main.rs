//! SasPer API Server
//!
//! Main entry point for the SasPer notification and analysis backend.

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sasper_api::{AppState, create_router};
use sasper_core::analysis::AnalysisService;
use sasper_core::budget::BudgetCheckService;
use sasper_db::{
    BudgetRepository, ProfileRepository, TransactionRepository, connect,
};
use sasper_shared::{AppConfig, FcmClient, GeminiClient};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sasper=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load().context("Failed to load configuration")?;

    // Connect to database
    let db = connect(
        &config.database.url,
        config.database.max_connections,
        config.database.min_connections,
    )
    .await?;
    info!("Connected to database");

    // Outbound clients
    let push = Arc::new(FcmClient::new(config.push.clone())?);
    let llm = config
        .llm
        .clone()
        .context("Missing language model configuration (SASPER__LLM__API_KEY)")?;
    let model = Arc::new(GeminiClient::new(llm)?);
    info!(model = model.model(), "Language model configured");

    let transactions = Arc::new(TransactionRepository::new(db.clone()));
    let budget_check = BudgetCheckService::new(
        Arc::new(BudgetRepository::new(db.clone())),
        transactions.clone(),
        Arc::new(ProfileRepository::new(db)),
        push,
    );
    let analysis = AnalysisService::new(transactions, model);

    // Create router
    let app = create_router(AppState::new(budget_check, analysis));

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
