//! OpenAiEngine implementation using the chat-completions API.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use tracing::{debug, info, warn};

use engine_core::{
    ChatTurn, Completion, CompletionEngine, EngineError, Role, ToolCall, ToolExecutor,
};

use crate::api_types::{
    ApiError, ChatCompletionRequest, ChatCompletionResponse, ChatMessage, ToolCallPayload,
};
use crate::config::OpenAiConfig;
use crate::prompt::system_prompt;

/// A completion engine backed by the OpenAI chat-completions API.
///
/// Each call rebuilds the system prompt with the acting user's id and the
/// current UTC clock, replays the stored conversation, and runs a bounded
/// tool-calling loop against the injected [`ToolExecutor`].
pub struct OpenAiEngine {
    client: Client,
    config: OpenAiConfig,
    executor: Option<Arc<dyn ToolExecutor>>,
}

impl OpenAiEngine {
    /// Create a new OpenAiEngine with the given configuration.
    pub fn new(config: OpenAiConfig) -> Result<Self, EngineError> {
        let client = Client::builder().build().map_err(|e| {
            EngineError::Configuration(format!("Failed to create HTTP client: {}", e))
        })?;

        info!(
            "OpenAiEngine initialized with model: {}, max tool rounds: {}",
            config.model, config.max_tool_rounds
        );

        Ok(Self {
            client,
            config,
            executor: None,
        })
    }

    /// Create an OpenAiEngine from environment variables.
    ///
    /// See [`OpenAiConfig::from_env`] for the environment variables read.
    pub fn from_env() -> Result<Self, EngineError> {
        Self::new(OpenAiConfig::from_env()?)
    }

    /// Attach a tool executor. Its tool declarations are advertised to the
    /// model and its `execute` is called for every tool request.
    pub fn with_executor(mut self, executor: Arc<dyn ToolExecutor>) -> Self {
        self.executor = Some(executor);
        self
    }

    /// Get the configuration.
    pub fn config(&self) -> &OpenAiConfig {
        &self.config
    }

    /// Make a chat completion request to the API.
    async fn chat_completion(
        &self,
        messages: Vec<ChatMessage>,
    ) -> Result<ChatCompletionResponse, EngineError> {
        let request = ChatCompletionRequest {
            model: self.config.model.clone(),
            messages,
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
            tools: self
                .executor
                .as_ref()
                .map(|e| e.definitions())
                .filter(|defs| !defs.is_empty()),
        };

        debug!("Sending request to OpenAI API: {:?}", request);

        let response = self
            .client
            .post(self.config.completions_url())
            .header(
                "Authorization",
                format!("Bearer {}", self.config.api_key),
            )
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| EngineError::Network(format!("Failed to send request: {}", e)))?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();

            if let Ok(api_error) = serde_json::from_str::<ApiError>(&error_text) {
                return Err(EngineError::CompletionFailed(format!(
                    "API error ({}): {}",
                    status.as_u16(),
                    api_error.error.message
                )));
            }

            return Err(EngineError::CompletionFailed(format!(
                "API error ({}): {}",
                status.as_u16(),
                error_text
            )));
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| EngineError::CompletionFailed(format!("Failed to parse response: {}", e)))?;

        debug!("Received response from OpenAI API: {:?}", completion);

        Ok(completion)
    }

    /// Execute one batch of tool calls, appending the request/result turns
    /// to `emitted` and the wire messages to `messages`.
    async fn run_tool_calls(
        &self,
        user_id: i64,
        calls: Vec<ToolCallPayload>,
        messages: &mut Vec<ChatMessage>,
        emitted: &mut Vec<ChatTurn>,
    ) -> Result<(), EngineError> {
        let executor = self.executor.as_ref().ok_or_else(|| {
            EngineError::CompletionFailed(
                "model requested tools but no executor is configured".to_string(),
            )
        })?;

        messages.push(ChatMessage::assistant_tool_calls(calls.clone()));

        for payload in calls {
            let call = ToolCall {
                id: payload.id.clone(),
                name: payload.function.name.clone(),
                arguments: payload.function.arguments.clone(),
            };

            debug!(
                "Executing tool {} for user {} (call {})",
                call.name, user_id, call.id
            );
            emitted.push(ChatTurn::tool_request(
                &call.id,
                &call.name,
                &call.arguments,
            ));

            let outcome = executor.execute(user_id, &call).await;
            if !outcome.success {
                warn!("Tool {} reported failure: {}", call.name, outcome.content);
            }

            emitted.push(ChatTurn::tool_result(&call.id, &call.name, &outcome.content));
            messages.push(ChatMessage::tool(&payload.id, &outcome.content));
        }

        Ok(())
    }
}

/// Map stored turns onto API messages: user turns become user messages,
/// textual system turns become assistant messages. Tool plumbing is not
/// replayed, the API rejects tool results with no matching request.
fn replay_history(prior: &[ChatTurn]) -> Vec<ChatMessage> {
    prior
        .iter()
        .filter_map(|turn| match turn.role {
            Role::User => turn.content.as_deref().map(ChatMessage::user),
            Role::System => turn.content.as_deref().map(ChatMessage::assistant),
            Role::ToolResult => None,
        })
        .collect()
}

#[async_trait]
impl CompletionEngine for OpenAiEngine {
    async fn complete(
        &self,
        user_id: i64,
        prior: &[ChatTurn],
        utterance: &str,
    ) -> Result<Completion, EngineError> {
        let mut messages = Vec::with_capacity(prior.len() + 2);
        messages.push(ChatMessage::system(system_prompt(user_id, Utc::now())));
        messages.extend(replay_history(prior));
        messages.push(ChatMessage::user(utterance));

        let mut emitted: Vec<ChatTurn> = Vec::new();

        for round in 0..self.config.max_tool_rounds {
            let completion = self.chat_completion(messages.clone()).await?;

            let message = completion
                .choices
                .into_iter()
                .next()
                .map(|c| c.message)
                .ok_or_else(|| {
                    EngineError::CompletionFailed("response contained no choices".to_string())
                })?;

            if let Some(calls) = message.tool_calls.filter(|c| !c.is_empty()) {
                debug!(
                    "Model requested {} tool call(s) in round {}",
                    calls.len(),
                    round + 1
                );
                self.run_tool_calls(user_id, calls, &mut messages, &mut emitted)
                    .await?;
                continue;
            }

            let reply = message.content.unwrap_or_else(|| {
                warn!("No content in response, using default");
                "I apologize, but I couldn't generate a response.".to_string()
            });

            emitted.push(ChatTurn::system(reply.clone()));
            return Ok(Completion {
                reply,
                turns: emitted,
            });
        }

        Err(EngineError::ToolRoundLimit {
            rounds: self.config.max_tool_rounds,
            turns: emitted,
        })
    }

    fn name(&self) -> &str {
        "OpenAiEngine"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replay_maps_user_and_system_turns() {
        let prior = vec![
            ChatTurn::user("remind me about the dentist"),
            ChatTurn::tool_request("call-1", "create_event", "{}"),
            ChatTurn::tool_result("call-1", "create_event", "Event created"),
            ChatTurn::system("Done, I set that up for you."),
        ];

        let messages = replay_history(&prior);
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, "user");
        assert_eq!(
            messages[0].content.as_deref(),
            Some("remind me about the dentist")
        );
        assert_eq!(messages[1].role, "assistant");
        assert_eq!(
            messages[1].content.as_deref(),
            Some("Done, I set that up for you.")
        );
    }

    #[test]
    fn test_replay_empty_history() {
        assert!(replay_history(&[]).is_empty());
    }

    #[test]
    fn test_engine_name() {
        let config = OpenAiConfig::builder().api_key("test-key").build();
        let engine = OpenAiEngine::new(config).unwrap();
        assert_eq!(engine.name(), "OpenAiEngine");
    }

    #[test]
    fn test_no_tools_advertised_without_executor() {
        let config = OpenAiConfig::builder().api_key("test-key").build();
        let engine = OpenAiEngine::new(config).unwrap();
        assert!(engine.executor.is_none());
    }
}
