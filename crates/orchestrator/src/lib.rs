//! Conversation orchestration for the SMS assistant.
//!
//! This crate owns the two core control loops:
//!
//! - [`Orchestrator`] - the per-message state machine: validates the sender,
//!   runs the opt-in handshake, and drives the completion engine for
//!   onboarded users, persisting every exchange.
//! - [`ReminderScheduler`] - the background loop that claims due reminders,
//!   softens them through the engine, and delivers them.
//!
//! Both are built from injected components (`Database`, an
//! `Arc<dyn CompletionEngine>`, an `Arc<dyn SmsSender>`) so tests can swap
//! in scripted engines and recording senders.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use database::Database;
//! use mock_engine::EchoEngine;
//! use orchestrator::Orchestrator;
//! use sms_gateway::LoggingSender;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let db = Database::connect("sqlite:assistant.db?mode=rwc").await?;
//! db.migrate().await?;
//!
//! let orchestrator = Orchestrator::new(
//!     db,
//!     Arc::new(EchoEngine::new()),
//!     Arc::new(LoggingSender),
//! );
//!
//! let reply = orchestrator.handle_inbound("+15551234567", "hi").await?;
//! # Ok(())
//! # }
//! ```

mod error;
mod history;
mod orchestrator;
pub mod phone;
mod scheduler;

pub use error::OrchestratorError;
pub use orchestrator::{
    Orchestrator, HISTORY_LIMIT, OPT_IN_CONFIRMATION, OPT_IN_KEYWORD, OPT_IN_PROMPT,
};
pub use scheduler::{ReminderScheduler, DEFAULT_CONCURRENCY, DEFAULT_POLL_INTERVAL};
