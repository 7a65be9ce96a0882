//! Echo engine implementation - echoes utterances back.

use async_trait::async_trait;

use engine_core::{ChatTurn, Completion, CompletionEngine, EngineError};

/// A simple engine that echoes the utterance back to the caller.
///
/// Useful for testing the message flow without any model processing.
#[derive(Debug, Clone, Default)]
pub struct EchoEngine {
    /// Optional prefix to add before the echo.
    prefix: Option<String>,
}

impl EchoEngine {
    /// Create a new EchoEngine with no prefix.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new EchoEngine with a custom prefix.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: Some(prefix.into()),
        }
    }
}

#[async_trait]
impl CompletionEngine for EchoEngine {
    async fn complete(
        &self,
        _user_id: i64,
        _prior: &[ChatTurn],
        utterance: &str,
    ) -> Result<Completion, EngineError> {
        let reply = match &self.prefix {
            Some(prefix) => format!("{}{}", prefix, utterance),
            None => utterance.to_string(),
        };

        Ok(Completion::reply(reply))
    }

    fn name(&self) -> &str {
        "EchoEngine"
    }
}
