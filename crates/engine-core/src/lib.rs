//! Core trait and types for completion engine implementations.
//!
//! This crate provides the shared interface between the conversation
//! orchestrator and any LLM backend. It defines:
//!
//! - [`CompletionEngine`] - The trait that all engine implementations must implement
//! - [`ChatTurn`] / [`Role`] - Conversation turn types persisted by the orchestrator
//! - [`Completion`] - The result of one engine call (final reply + emitted turns)
//! - [`ToolExecutor`] - Trait for executing tool calls the model makes mid-completion
//! - [`EngineError`] - Error types for engine operations
//!
//! # Example
//!
//! ```rust
//! use engine_core::{async_trait, ChatTurn, Completion, CompletionEngine, EngineError};
//!
//! struct CannedEngine;
//!
//! #[async_trait]
//! impl CompletionEngine for CannedEngine {
//!     async fn complete(
//!         &self,
//!         _user_id: i64,
//!         _prior: &[ChatTurn],
//!         _utterance: &str,
//!     ) -> Result<Completion, EngineError> {
//!         Ok(Completion::reply("Hello!"))
//!     }
//!
//!     fn name(&self) -> &str {
//!         "CannedEngine"
//!     }
//! }
//! ```

mod error;
mod tools;
mod trait_def;
mod turn;

pub use error::EngineError;
pub use tools::{FunctionDefinition, ToolCall, ToolDefinition, ToolExecutor, ToolOutcome};
pub use trait_def::{Completion, CompletionEngine};
pub use turn::{ChatTurn, Role, ToolCallInfo};

// Re-export async_trait for convenience
pub use async_trait::async_trait;
