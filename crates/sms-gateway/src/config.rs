//! Twilio client configuration.

use std::env;

use crate::error::SmsError;

/// Default Twilio API base URL.
pub const DEFAULT_API_URL: &str = "https://api.twilio.com";

/// Configuration for [`TwilioClient`](crate::TwilioClient).
#[derive(Debug, Clone)]
pub struct TwilioConfig {
    /// Twilio API base URL.
    pub api_url: String,
    /// Account SID for authentication.
    pub account_sid: String,
    /// Auth token for authentication.
    pub auth_token: String,
    /// The number messages are sent from (E.164).
    pub from_number: String,
    /// When true, log sends instead of calling the API.
    pub dry_run: bool,
}

impl TwilioConfig {
    /// Create configuration from environment variables.
    ///
    /// Required environment variables:
    /// - `TWILIO_ACCOUNT_SID` - Account SID
    /// - `TWILIO_AUTH_TOKEN` - Auth token
    /// - `TWILIO_PHONE_NUMBER` - Sending number (E.164)
    ///
    /// Optional environment variables:
    /// - `TWILIO_API_URL` - API base URL (default: https://api.twilio.com)
    /// - `TWILIO_DRY_RUN` - Log instead of sending (default: false)
    pub fn from_env() -> Result<Self, SmsError> {
        let account_sid = env::var("TWILIO_ACCOUNT_SID")
            .map_err(|_| SmsError::Config("TWILIO_ACCOUNT_SID not set".to_string()))?;

        let auth_token = env::var("TWILIO_AUTH_TOKEN")
            .map_err(|_| SmsError::Config("TWILIO_AUTH_TOKEN not set".to_string()))?;

        let from_number = env::var("TWILIO_PHONE_NUMBER")
            .map_err(|_| SmsError::Config("TWILIO_PHONE_NUMBER not set".to_string()))?;

        let api_url = env::var("TWILIO_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        let dry_run = env::var("TWILIO_DRY_RUN")
            .ok()
            .map(|v| v.to_lowercase() == "true" || v == "1")
            .unwrap_or(false);

        Ok(Self {
            api_url,
            account_sid,
            auth_token,
            from_number,
            dry_run,
        })
    }

    /// Create a config with explicit credentials (dry-run off).
    pub fn new(
        account_sid: impl Into<String>,
        auth_token: impl Into<String>,
        from_number: impl Into<String>,
    ) -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            account_sid: account_sid.into(),
            auth_token: auth_token.into(),
            from_number: from_number.into(),
            dry_run: false,
        }
    }

    /// Enable dry-run mode.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// The Messages endpoint URL for this account.
    pub fn messages_url(&self) -> String {
        format!(
            "{}/2010-04-01/Accounts/{}/Messages.json",
            self.api_url, self.account_sid
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_url() {
        let config = TwilioConfig::new("AC123", "token", "+15550001111");
        assert_eq!(
            config.messages_url(),
            "https://api.twilio.com/2010-04-01/Accounts/AC123/Messages.json"
        );
    }

    #[test]
    fn test_dry_run_builder() {
        let config = TwilioConfig::new("AC123", "token", "+15550001111").with_dry_run(true);
        assert!(config.dry_run);
    }
}
