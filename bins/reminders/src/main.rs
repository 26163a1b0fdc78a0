//! Recurring transaction reminder job.
//!
//! Sends a push reminder for every recurring transaction due tomorrow, then
//! exits. Meant to be started once a day by an external scheduler.
//!
//! Exits non-zero only when the due reminders cannot be read; individual
//! delivery failures and malformed rows are logged and counted. Needs the
//! database and push sections of the configuration, not the language model.

use std::sync::Arc;

use anyhow::Context;
use chrono::Utc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sasper_core::reminder::ReminderService;
use sasper_db::{RecurringRepository, connect};
use sasper_shared::{AppConfig, FcmClient};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sasper=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load().context("Failed to load configuration")?;
    let db = connect(
        &config.database.url,
        config.database.max_connections,
        config.database.min_connections,
    )
    .await
    .context("Failed to connect to database")?;

    let service = ReminderService::new(
        Arc::new(RecurringRepository::new(db)),
        Arc::new(FcmClient::new(config.push)?),
    );

    let report = service
        .send_due_reminders(Utc::now().date_naive())
        .await
        .context("Reminder run failed")?;

    info!(
        due_date = %report.due_date,
        found = report.found,
        sent = report.sent,
        skipped = report.skipped,
        failed = report.failed,
        malformed = report.malformed,
        "Reminder run finished"
    );

    Ok(())
}
