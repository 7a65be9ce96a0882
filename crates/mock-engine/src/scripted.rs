//! Scripted engine implementation - replays queued responses and records
//! every call for assertions.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use engine_core::{
    ChatTurn, Completion, CompletionEngine, EngineError, ToolCall, ToolExecutor,
};

/// One recorded `complete` call.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    /// The user id the completion ran for.
    pub user_id: i64,
    /// Number of prior turns supplied by the caller.
    pub prior_len: usize,
    /// The utterance passed in.
    pub utterance: String,
}

enum Script {
    Reply(String),
    ToolThenReply {
        tool_name: String,
        arguments: String,
        reply: String,
    },
}

/// An engine that plays back scripted responses in queue order.
///
/// Each call to `complete` pops the next script. A plain reply produces a
/// single system turn; a tool script invokes the configured
/// [`ToolExecutor`] with the acting user's id and emits the request and
/// result turns before the reply, mirroring what a real backend would do.
/// When the queue is empty the engine answers with a fixed fallback.
pub struct ScriptedEngine {
    scripts: Mutex<VecDeque<Script>>,
    calls: Mutex<Vec<RecordedCall>>,
    executor: Option<Arc<dyn ToolExecutor>>,
    fallback: String,
}

impl ScriptedEngine {
    /// Create an engine with an empty script queue and no tool executor.
    pub fn new() -> Self {
        Self {
            scripts: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
            executor: None,
            fallback: "OK".to_string(),
        }
    }

    /// Create an engine that dispatches scripted tool calls to `executor`.
    pub fn with_executor(executor: Arc<dyn ToolExecutor>) -> Self {
        Self {
            executor: Some(executor),
            ..Self::new()
        }
    }

    /// Set the reply used when the script queue is empty.
    pub fn with_fallback(mut self, fallback: impl Into<String>) -> Self {
        self.fallback = fallback.into();
        self
    }

    /// Queue a plain reply.
    pub async fn push_reply(&self, reply: impl Into<String>) {
        self.scripts
            .lock()
            .await
            .push_back(Script::Reply(reply.into()));
    }

    /// Queue a tool invocation followed by a reply. Requires an executor.
    pub async fn push_tool_call(
        &self,
        tool_name: impl Into<String>,
        arguments: impl Into<String>,
        reply: impl Into<String>,
    ) {
        self.scripts.lock().await.push_back(Script::ToolThenReply {
            tool_name: tool_name.into(),
            arguments: arguments.into(),
            reply: reply.into(),
        });
    }

    /// All calls received so far, in order.
    pub async fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().await.clone()
    }

    /// Number of calls received so far.
    pub async fn call_count(&self) -> usize {
        self.calls.lock().await.len()
    }
}

impl Default for ScriptedEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CompletionEngine for ScriptedEngine {
    async fn complete(
        &self,
        user_id: i64,
        prior: &[ChatTurn],
        utterance: &str,
    ) -> Result<Completion, EngineError> {
        self.calls.lock().await.push(RecordedCall {
            user_id,
            prior_len: prior.len(),
            utterance: utterance.to_string(),
        });

        let script = self.scripts.lock().await.pop_front();
        match script {
            None => Ok(Completion::reply(self.fallback.clone())),
            Some(Script::Reply(reply)) => Ok(Completion::reply(reply)),
            Some(Script::ToolThenReply {
                tool_name,
                arguments,
                reply,
            }) => {
                let executor = self.executor.as_ref().ok_or_else(|| {
                    EngineError::Configuration(
                        "scripted tool call queued without an executor".to_string(),
                    )
                })?;

                let call_id = format!("scripted-{}", self.calls.lock().await.len());
                let call = ToolCall {
                    id: call_id.clone(),
                    name: tool_name.clone(),
                    arguments: arguments.clone(),
                };
                let outcome = executor.execute(user_id, &call).await;

                let turns = vec![
                    ChatTurn::tool_request(&call_id, &tool_name, &arguments),
                    ChatTurn::tool_result(&call_id, &tool_name, &outcome.content),
                    ChatTurn::system(reply.clone()),
                ];

                Ok(Completion { reply, turns })
            }
        }
    }

    fn name(&self) -> &str {
        "ScriptedEngine"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine_core::{Role, ToolDefinition, ToolOutcome};

    struct UpperExecutor;

    #[async_trait]
    impl ToolExecutor for UpperExecutor {
        async fn execute(&self, user_id: i64, call: &ToolCall) -> ToolOutcome {
            ToolOutcome::success(
                &call.id,
                format!("{}:{}", user_id, call.arguments.to_uppercase()),
            )
        }

        fn definitions(&self) -> Vec<ToolDefinition> {
            vec![]
        }
    }

    #[tokio::test]
    async fn test_replays_in_queue_order() {
        let engine = ScriptedEngine::new();
        engine.push_reply("first").await;
        engine.push_reply("second").await;

        assert_eq!(engine.complete(1, &[], "a").await.unwrap().reply, "first");
        assert_eq!(engine.complete(1, &[], "b").await.unwrap().reply, "second");
    }

    #[tokio::test]
    async fn test_fallback_when_queue_empty() {
        let engine = ScriptedEngine::new().with_fallback("nothing scripted");
        let completion = engine.complete(1, &[], "hi").await.unwrap();
        assert_eq!(completion.reply, "nothing scripted");
    }

    #[tokio::test]
    async fn test_records_calls() {
        let engine = ScriptedEngine::new();
        engine.push_reply("ok").await;

        let prior = vec![ChatTurn::user("earlier")];
        engine.complete(42, &prior, "now").await.unwrap();

        let calls = engine.calls().await;
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].user_id, 42);
        assert_eq!(calls[0].prior_len, 1);
        assert_eq!(calls[0].utterance, "now");
    }

    #[tokio::test]
    async fn test_scripted_tool_call_emits_all_turns() {
        let engine = ScriptedEngine::with_executor(Arc::new(UpperExecutor));
        engine.push_tool_call("echo", "hello", "All set!").await;

        let completion = engine.complete(7, &[], "do it").await.unwrap();
        assert_eq!(completion.reply, "All set!");
        assert_eq!(completion.turns.len(), 3);
        assert!(completion.turns[0].is_tool_request());
        assert_eq!(completion.turns[1].role, Role::ToolResult);
        assert_eq!(completion.turns[1].content.as_deref(), Some("7:HELLO"));
        assert_eq!(completion.turns[2].content.as_deref(), Some("All set!"));
    }

    #[tokio::test]
    async fn test_tool_script_without_executor_errors() {
        let engine = ScriptedEngine::new();
        engine.push_tool_call("echo", "{}", "never").await;

        let err = engine.complete(1, &[], "go").await.unwrap_err();
        assert!(matches!(err, EngineError::Configuration(_)));
    }
}
