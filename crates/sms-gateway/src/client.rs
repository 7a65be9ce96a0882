//! Twilio Messages API client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info, warn};

use crate::config::TwilioConfig;
use crate::error::SmsError;
use crate::sender::SmsSender;
use crate::types::{SendForm, SendResponse};

/// Default HTTP timeout for API requests (30 seconds).
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Client for the Twilio Messages API.
///
/// In dry-run mode sends are logged and skipped, which mirrors how the
/// service runs outside production.
#[derive(Clone)]
pub struct TwilioClient {
    http: Client,
    config: TwilioConfig,
}

impl TwilioClient {
    /// Create a new client with the given configuration.
    pub fn new(config: TwilioConfig) -> Result<Self, SmsError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS))
            .build()
            .map_err(SmsError::Http)?;

        info!(
            "TwilioClient initialized (from: {}, dry_run: {})",
            config.from_number, config.dry_run
        );

        Ok(Self { http, config })
    }

    /// Create a client from environment variables.
    ///
    /// See [`TwilioConfig::from_env`] for the variables used.
    pub fn from_env() -> Result<Self, SmsError> {
        Self::new(TwilioConfig::from_env()?)
    }

    /// Get the configuration.
    pub fn config(&self) -> &TwilioConfig {
        &self.config
    }

    async fn send_message(&self, to: &str, body: &str) -> Result<(), SmsError> {
        if self.config.dry_run {
            info!("[dry-run] SMS to {}: {}", to, body);
            return Ok(());
        }

        let form = SendForm {
            to,
            from: &self.config.from_number,
            body,
        };

        debug!("Sending SMS to {} via Twilio", to);

        let response = self
            .http
            .post(self.config.messages_url())
            .basic_auth(&self.config.account_sid, Some(&self.config.auth_token))
            .form(&form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<SendResponse>()
                .await
                .ok()
                .and_then(|r| r.message)
                .unwrap_or_else(|| "unknown error".to_string());

            warn!("Twilio rejected send to {}: {} {}", to, status, message);
            return Err(SmsError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let result: SendResponse = response.json().await?;
        debug!(
            "Twilio accepted message (sid: {:?}, status: {:?})",
            result.sid, result.status
        );

        Ok(())
    }
}

#[async_trait]
impl SmsSender for TwilioClient {
    async fn send(&self, to: &str, body: &str) -> Result<(), SmsError> {
        self.send_message(to, body).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_dry_run_never_hits_network() {
        let config = TwilioConfig::new("AC123", "token", "+15550001111").with_dry_run(true);
        let client = TwilioClient::new(config).unwrap();

        // Would fail with a connection error if it tried the real API
        client.send("+15551234567", "hello").await.unwrap();
    }
}
