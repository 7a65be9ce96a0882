//! Tool execution support for completion engines.
//!
//! During a completion the model may request tool invocations. The engine
//! forwards each request to a [`ToolExecutor`] together with the id of the
//! user the completion is running for — tool handlers never trust a user id
//! supplied by the model.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A tool invocation requested by the model.
#[derive(Debug, Clone)]
pub struct ToolCall {
    /// Backend-assigned id for this call.
    pub id: String,
    /// Name of the tool to execute.
    pub name: String,
    /// Raw JSON arguments as produced by the model.
    pub arguments: String,
}

/// Result of a tool execution.
#[derive(Debug, Clone)]
pub struct ToolOutcome {
    /// The tool call id this outcome corresponds to.
    pub call_id: String,
    /// The outcome content (fed back to the model verbatim).
    pub content: String,
    /// Whether the tool execution succeeded.
    pub success: bool,
}

impl ToolOutcome {
    /// Create a successful outcome.
    pub fn success(call_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            call_id: call_id.into(),
            content: content.into(),
            success: true,
        }
    }

    /// Create a failed outcome. Failures are model-visible text, never an
    /// abort of the surrounding completion.
    pub fn failure(call_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            call_id: call_id.into(),
            content: content.into(),
            success: false,
        }
    }
}

/// A tool declaration advertised to the model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Tool type (always "function").
    #[serde(rename = "type")]
    pub tool_type: String,
    /// Function schema.
    pub function: FunctionDefinition,
}

/// Function schema for a tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionDefinition {
    /// Name of the function.
    pub name: String,
    /// Description of what the function does.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// JSON Schema for the function parameters.
    pub parameters: Value,
}

impl ToolDefinition {
    /// Create a function tool definition.
    pub fn function(
        name: impl Into<String>,
        description: impl Into<String>,
        parameters: Value,
    ) -> Self {
        Self {
            tool_type: "function".to_string(),
            function: FunctionDefinition {
                name: name.into(),
                description: Some(description.into()),
                parameters,
            },
        }
    }
}

/// Trait for executing tool calls made by a completion engine.
///
/// The executor receives the acting user's id at dispatch time; user
/// scoping is the executor's responsibility, not the model's.
#[async_trait]
pub trait ToolExecutor: Send + Sync {
    /// Execute a tool call on behalf of `user_id` and return the outcome.
    async fn execute(&self, user_id: i64, call: &ToolCall) -> ToolOutcome;

    /// The tool declarations to advertise to the model.
    fn definitions(&self) -> Vec<ToolDefinition>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_success() {
        let outcome = ToolOutcome::success("call-123", "Some data");
        assert!(outcome.success);
        assert_eq!(outcome.call_id, "call-123");
        assert_eq!(outcome.content, "Some data");
    }

    #[test]
    fn test_outcome_failure() {
        let outcome = ToolOutcome::failure("call-456", "Could not save the event");
        assert!(!outcome.success);
        assert_eq!(outcome.content, "Could not save the event");
    }

    #[test]
    fn test_definition_serializes_as_function() {
        let def = ToolDefinition::function(
            "create_event",
            "Create an event",
            serde_json::json!({"type": "object", "properties": {}}),
        );

        let json = serde_json::to_string(&def).unwrap();
        assert!(json.contains(r#""type":"function""#));
        assert!(json.contains("create_event"));
    }
}
