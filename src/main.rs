//! # Expense Bot
//!
//! Webhook-driven expense classification service.
//!
//! This is the application entry point that initializes:
//! - Tracing/logging subsystem
//! - Configuration loading
//! - Service clients (Telegram, classifier, shorteners, task queue)
//! - HTTP server

use anyhow::Result;
use tracing::info;

use expense_bot::config::Settings;
use expense_bot::startup::Application;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber for structured logging
    expense_bot::telemetry::init_tracing();

    info!("Starting Expense Bot...");

    // Load configuration from environment and config files
    let settings = Settings::load()?;
    info!(
        host = %settings.server.host,
        port = %settings.server.port,
        environment = %settings.environment,
        "Configuration loaded"
    );

    // Build and run the application
    let application = Application::build(settings).await?;

    info!("Server ready to accept connections");
    application.run_until_stopped().await?;

    Ok(())
}
