//! Error types for engine operations.

use thiserror::Error;

use crate::turn::ChatTurn;

/// Errors that can occur during completion processing.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Invalid or missing configuration.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A network-level failure talking to the backend.
    #[error("network error: {0}")]
    Network(String),

    /// The backend returned an error or an unusable response.
    #[error("completion failed: {0}")]
    CompletionFailed(String),

    /// The model kept requesting tools past the allowed round limit.
    ///
    /// Carries the turns emitted before the cap tripped: tools in earlier
    /// rounds have already run, so callers can still record their requests
    /// and results.
    #[error("tool round limit exceeded after {rounds} rounds")]
    ToolRoundLimit { rounds: usize, turns: Vec<ChatTurn> },
}
