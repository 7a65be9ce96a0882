//! Outbound SMS sender trait and test implementations.

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::error::SmsError;

/// Trait for sending outbound SMS.
///
/// Abstracted to support different transports (Twilio, tests, etc.)
#[async_trait]
pub trait SmsSender: Send + Sync {
    /// Send a text message.
    ///
    /// # Arguments
    /// * `to` - Recipient address (E.164)
    /// * `body` - Message content
    async fn send(&self, to: &str, body: &str) -> Result<(), SmsError>;
}

/// A no-op sender for testing that discards all messages.
#[derive(Debug, Clone, Default)]
pub struct NoOpSender;

#[async_trait]
impl SmsSender for NoOpSender {
    async fn send(&self, _to: &str, _body: &str) -> Result<(), SmsError> {
        Ok(())
    }
}

/// A logging sender for local development that logs all sends.
#[derive(Debug, Clone, Default)]
pub struct LoggingSender;

#[async_trait]
impl SmsSender for LoggingSender {
    async fn send(&self, to: &str, body: &str) -> Result<(), SmsError> {
        tracing::info!("Sending SMS to {}: {}", to, body);
        Ok(())
    }
}

/// A sender that records every message for later inspection in tests.
#[derive(Debug, Default)]
pub struct RecordingSender {
    sent: Mutex<Vec<(String, String)>>,
}

impl RecordingSender {
    /// Create a new recording sender.
    pub fn new() -> Self {
        Self::default()
    }

    /// All (to, body) pairs sent so far, in order.
    pub async fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().await.clone()
    }

    /// Number of messages sent so far.
    pub async fn sent_count(&self) -> usize {
        self.sent.lock().await.len()
    }
}

#[async_trait]
impl SmsSender for RecordingSender {
    async fn send(&self, to: &str, body: &str) -> Result<(), SmsError> {
        self.sent
            .lock()
            .await
            .push((to.to_string(), body.to_string()));
        Ok(())
    }
}
