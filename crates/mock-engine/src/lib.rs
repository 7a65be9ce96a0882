//! Mock completion engines for testing the SMS assistant pipeline.
//!
//! Provides deterministic [`CompletionEngine`] implementations so the
//! orchestrator and scheduler can be exercised without a model API:
//!
//! - [`EchoEngine`] - echoes the utterance back, optionally prefixed
//! - [`ScriptedEngine`] - plays back queued replies and records every
//!   call it receives, with optional scripted tool invocations
//!
//! # Example
//!
//! ```rust
//! use mock_engine::ScriptedEngine;
//! use engine_core::CompletionEngine;
//!
//! #[tokio::main]
//! async fn main() {
//!     let engine = ScriptedEngine::new();
//!     engine.push_reply("Sure, done!").await;
//!
//!     let completion = engine.complete(1, &[], "remind me later").await.unwrap();
//!     assert_eq!(completion.reply, "Sure, done!");
//!     assert_eq!(engine.call_count().await, 1);
//! }
//! ```

mod echo;
mod scripted;

pub use echo::EchoEngine;
pub use scripted::{RecordedCall, ScriptedEngine};
