//! Tool registry and event tools for the remy SMS assistant.
//!
//! This crate provides the `ToolRegistry` and the two capabilities the
//! completion engine can invoke mid-conversation:
//!
//! - [`CreateEvent`] - Insert an event and derive its reminder by the
//!   lead-time rule (24h before when more than 72h out, else 1h before).
//! - [`SearchEvents`] - Query the user's events inside a padded window
//!   around an anchor date.
//!
//! Tools are always dispatched with the acting user's id; the model never
//! supplies one. Tool failures (bad arguments, store errors) surface as
//! model-visible text, never as an abort of the surrounding completion.
//!
//! The registry implements [`engine_core::ToolExecutor`], so it plugs
//! directly into any `CompletionEngine`.
//!
//! # Example
//!
//! ```rust,ignore
//! use assistant_tools::default_registry;
//! use database::Database;
//!
//! let db = Database::connect("sqlite::memory:").await?;
//! let registry = default_registry(db);
//! assert!(registry.has_tool("create_event"));
//! ```

mod error;
mod registry;
pub mod schedule;
mod tool;
pub mod tools;

pub use error::ToolError;
pub use registry::ToolRegistry;
pub use tool::{Tool, ToolArgs, ToolOutput};
pub use tools::{CreateEvent, SearchEvents, NO_EVENTS_FOUND};

// Re-export async_trait for convenience
pub use async_trait::async_trait;

use database::Database;

/// Create a registry with both event tools registered.
pub fn default_registry(db: Database) -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    registry.register(CreateEvent::new(db.clone()));
    registry.register(SearchEvents::new(db));
    registry
}
