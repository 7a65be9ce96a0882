//! Error types for tool operations.

use thiserror::Error;

/// Errors that can occur during tool execution.
///
/// These never abort a completion: the registry converts them into
/// model-visible failure text.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Tool not found in registry.
    #[error("Tool not found: {0}")]
    NotFound(String),

    /// Missing required parameter.
    #[error("Missing required parameter: {0}")]
    MissingParameter(String),

    /// Invalid parameter value.
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },

    /// Model-produced arguments were not valid JSON.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}
