//! Twilio SMS transport for remy.
//!
//! This crate provides:
//!
//! - [`SmsSender`] - The outbound delivery trait consumed by the
//!   orchestrator and the reminder scheduler
//! - [`TwilioClient`] - A Twilio Messages API client with a dry-run mode
//! - [`InboundSms`] - The form-encoded webhook payload Twilio posts
//! - [`NoOpSender`] / [`LoggingSender`] / [`RecordingSender`] - Senders
//!   for tests and local development
//!
//! Delivery is fire-and-forget from the core's perspective: callers log
//! send failures but never treat them as fatal.

mod client;
mod config;
mod error;
mod sender;
mod types;

pub use client::TwilioClient;
pub use config::TwilioConfig;
pub use error::SmsError;
pub use sender::{LoggingSender, NoOpSender, RecordingSender, SmsSender};
pub use types::InboundSms;

// Re-export async_trait for convenience
pub use async_trait::async_trait;
