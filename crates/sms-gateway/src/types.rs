//! Wire types for the Twilio webhook and Messages API.

use serde::{Deserialize, Serialize};

/// The form-encoded payload Twilio posts to the inbound webhook.
///
/// Twilio sends a large parameter set; only `From` and `Body` are consumed
/// by the core, the rest are accepted so deserialization never fails on a
/// real webhook call.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InboundSms {
    /// Sender address (E.164).
    #[serde(rename = "From")]
    pub from: String,
    /// Message text.
    #[serde(rename = "Body", default)]
    pub body: String,
    /// Twilio message SID.
    #[serde(rename = "MessageSid", default)]
    pub message_sid: Option<String>,
    /// Twilio account SID.
    #[serde(rename = "AccountSid", default)]
    pub account_sid: Option<String>,
    /// Destination number (the service's own number).
    #[serde(rename = "To", default)]
    pub to: Option<String>,
    /// Number of message segments.
    #[serde(rename = "NumSegments", default)]
    pub num_segments: Option<String>,
    /// Sender country, when Twilio provides it.
    #[serde(rename = "FromCountry", default)]
    pub from_country: Option<String>,
}

/// Form body for the Messages API create call.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct SendForm<'a> {
    #[serde(rename = "To")]
    pub to: &'a str,
    #[serde(rename = "From")]
    pub from: &'a str,
    #[serde(rename = "Body")]
    pub body: &'a str,
}

/// Subset of the Messages API response we care about.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct SendResponse {
    pub sid: Option<String>,
    pub status: Option<String>,
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inbound_sms_from_form() {
        let payload = "From=%2B15551234567&Body=hello+there&MessageSid=SM123&To=%2B15550001111";
        let inbound: InboundSms = serde_urlencoded::from_str(payload).unwrap();

        assert_eq!(inbound.from, "+15551234567");
        assert_eq!(inbound.body, "hello there");
        assert_eq!(inbound.message_sid.as_deref(), Some("SM123"));
    }

    #[test]
    fn test_inbound_sms_ignores_unknown_fields() {
        let payload = "From=%2B15551234567&Body=hi&SmsStatus=received&ApiVersion=2010-04-01";
        let inbound: InboundSms = serde_urlencoded::from_str(payload).unwrap();
        assert_eq!(inbound.body, "hi");
    }
}
