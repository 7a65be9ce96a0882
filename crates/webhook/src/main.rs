//! Inbound SMS webhook server.
//!
//! Wires the whole assistant together: database, tool registry, OpenAI
//! engine, Twilio sender, orchestrator, and the reminder scheduler task.

mod config;
mod error;
mod routes;
mod state;

use std::sync::Arc;

use assistant_tools::default_registry;
use database::Database;
use openai_engine::OpenAiEngine;
use orchestrator::{Orchestrator, ReminderScheduler};
use sms_gateway::TwilioClient;
use tracing::info;

use crate::config::Config;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    // Load configuration
    let config = Config::from_env()?;
    info!(addr = %config.addr, "Starting webhook server");

    // Connect to database
    let db = Database::connect(&config.database_url).await?;
    db.migrate().await?;

    // Outbound SMS transport
    let sender = Arc::new(TwilioClient::from_env()?);

    // Completion engine with the event tools attached
    let registry = Arc::new(default_registry(db.clone()));
    let engine = Arc::new(OpenAiEngine::from_env()?.with_executor(registry));

    // Conversation orchestrator
    let orchestrator = Arc::new(Orchestrator::new(
        db.clone(),
        engine.clone(),
        sender.clone(),
    ));

    // Reminder scheduler runs for the lifetime of the process
    let scheduler = ReminderScheduler::new(db, engine, sender);
    tokio::spawn(async move {
        scheduler.run().await;
    });

    // Build router
    let state = AppState::new(orchestrator);
    let app = routes::router().with_state(state);

    // Start server
    info!(addr = %config.addr, "Webhook server listening");
    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
