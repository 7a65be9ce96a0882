//! The CompletionEngine trait definition.

use async_trait::async_trait;

use crate::error::EngineError;
use crate::turn::ChatTurn;

/// The result of one completion call.
#[derive(Debug, Clone)]
pub struct Completion {
    /// The final natural-language reply.
    pub reply: String,
    /// Every turn produced during the call, in order: tool requests, tool
    /// results, and finally the reply itself as a system turn. The caller
    /// persists these alongside the user's own turn.
    pub turns: Vec<ChatTurn>,
}

impl Completion {
    /// A completion with no tool activity, just a reply.
    pub fn reply(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            turns: vec![ChatTurn::system(text.clone())],
            reply: text,
        }
    }
}

/// A trait for generating replies from conversation context.
///
/// Implementations can range from scripted test engines to full LLM
/// backends with tool calling. This trait is object-safe and can be used
/// with `Arc<dyn CompletionEngine>`.
#[async_trait]
pub trait CompletionEngine: Send + Sync {
    /// Generate a reply to `utterance` for the given user.
    ///
    /// # Arguments
    ///
    /// * `user_id` - The acting user; bound to any tool call the model makes.
    /// * `prior` - Prior conversation turns, oldest first.
    /// * `utterance` - The new user message.
    ///
    /// # Returns
    ///
    /// A [`Completion`] carrying the final reply and all emitted turns, or
    /// an error if the backend call failed.
    async fn complete(
        &self,
        user_id: i64,
        prior: &[ChatTurn],
        utterance: &str,
    ) -> Result<Completion, EngineError>;

    /// Get a human-readable name for this engine implementation.
    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reply_completion() {
        let completion = Completion::reply("done");
        assert_eq!(completion.reply, "done");
        assert_eq!(completion.turns.len(), 1);
        assert_eq!(completion.turns[0].content.as_deref(), Some("done"));
    }
}
