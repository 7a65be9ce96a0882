//! Error types for orchestration.

use thiserror::Error;

use database::DatabaseError;
use engine_core::EngineError;

/// Errors that can occur while handling an inbound message or a reminder.
#[derive(Debug, Error)]
pub enum OrchestratorError {
    /// The sender address does not match the supported format.
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// No account exists for the sender's phone number.
    #[error("unknown user: {0}")]
    UnknownUser(String),

    /// The user has not completed the opt-in handshake.
    #[error("opt-in required")]
    OptInRequired,

    /// A persistence operation failed.
    #[error("store error: {0}")]
    Store(#[from] DatabaseError),

    /// The completion engine failed.
    #[error("engine error: {0}")]
    Engine(#[from] EngineError),
}
