//! Tool trait definition and types.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ToolError;
use crate::schedule::parse_event_date;

/// Arguments passed to a tool for execution.
#[derive(Debug, Clone)]
pub struct ToolArgs {
    /// Parameters as key-value pairs, parsed from the model's JSON.
    pub params: HashMap<String, Value>,
}

impl ToolArgs {
    /// Create new tool arguments with the given parameters.
    pub fn new(params: HashMap<String, Value>) -> Self {
        Self { params }
    }

    /// Parse arguments from the model's raw JSON string.
    pub fn from_json(json: &str) -> Result<Self, ToolError> {
        let params: HashMap<String, Value> = serde_json::from_str(json)?;
        Ok(Self::new(params))
    }

    /// Get a string parameter, returning an error if missing or not a string.
    pub fn get_string(&self, key: &str) -> Result<String, ToolError> {
        self.params
            .get(key)
            .ok_or_else(|| ToolError::MissingParameter(key.to_string()))?
            .as_str()
            .map(|s| s.to_string())
            .ok_or_else(|| ToolError::InvalidParameter {
                name: key.to_string(),
                reason: "expected string".to_string(),
            })
    }

    /// Get an optional string parameter.
    pub fn get_string_opt(&self, key: &str) -> Option<String> {
        self.params.get(key)?.as_str().map(|s| s.to_string())
    }

    /// Get an optional boolean parameter with a default value.
    pub fn get_bool_or(&self, key: &str, default: bool) -> bool {
        self.params
            .get(key)
            .and_then(|v| v.as_bool())
            .unwrap_or(default)
    }

    /// Get a date-time parameter, accepting RFC 3339 and the naive formats
    /// models tend to produce.
    pub fn get_datetime(&self, key: &str) -> Result<DateTime<Utc>, ToolError> {
        let raw = self.get_string(key)?;
        parse_event_date(&raw).ok_or_else(|| ToolError::InvalidParameter {
            name: key.to_string(),
            reason: format!("could not parse '{}' as a date-time", raw),
        })
    }
}

/// Output from a tool execution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolOutput {
    /// The result content (fed back to the model verbatim).
    pub content: String,
    /// Whether the execution was successful.
    pub success: bool,
}

impl ToolOutput {
    /// Create a successful output.
    pub fn success(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            success: true,
        }
    }

    /// Create a failed output.
    pub fn failure(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            success: false,
        }
    }
}

/// Trait for tools the completion engine can invoke.
///
/// Tools take the acting user's id as an explicit parameter at dispatch
/// time, never from captured environment, so concurrent requests cannot
/// leak across users.
#[async_trait]
pub trait Tool: Send + Sync {
    /// The tool's unique name (used for dispatch).
    fn name(&self) -> &str;

    /// Human-readable description, advertised to the model.
    fn description(&self) -> &str;

    /// JSON Schema for the tool's parameters.
    fn parameters(&self) -> Value;

    /// Execute the tool for the given user with the given arguments.
    async fn execute(&self, user_id: i64, args: ToolArgs) -> Result<ToolOutput, ToolError>;
}
