//! OpenAI-backed completion engine.
//!
//! This crate provides a [`CompletionEngine`] implementation that talks to
//! the OpenAI chat-completions API, with a bounded tool-calling loop driven
//! by an injected [`ToolExecutor`].
//!
//! # Features
//!
//! - System prompt rebuilt per call with the acting user and current clock
//! - Stored conversation replay (tool plumbing excluded)
//! - Synchronous tool-calling loop with a hard round cap
//! - Configurable via environment variables
//!
//! # Usage
//!
//! ```rust,no_run
//! use openai_engine::OpenAiEngine;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let engine = OpenAiEngine::from_env()?;
//!     // Use the engine...
//!     Ok(())
//! }
//! ```

mod api_types;
mod config;
mod engine;
mod prompt;

pub use config::OpenAiConfig;
pub use engine::OpenAiEngine;
pub use prompt::system_prompt;

// Re-export engine-core types for convenience
pub use engine_core::{
    async_trait, ChatTurn, Completion, CompletionEngine, EngineError, Role, ToolCall,
    ToolExecutor,
};
