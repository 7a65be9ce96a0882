//! Phone number validation.
//!
//! Only US numbers are supported: a sender address must be `+1` followed by
//! exactly ten ASCII digits. Accounts are keyed by the ten-digit national
//! number with the country prefix stripped.

/// Supported country code prefix.
pub const COUNTRY_PREFIX: &str = "+1";

/// Validate a sender address and return the national 10-digit number.
pub fn normalize_address(from: &str) -> Option<String> {
    let national = from.strip_prefix(COUNTRY_PREFIX)?;
    if national.len() == 10 && national.bytes().all(|b| b.is_ascii_digit()) {
        Some(national.to_string())
    } else {
        None
    }
}

/// Render a national number back into a sendable address.
pub fn to_address(national: &str) -> String {
    format!("{}{}", COUNTRY_PREFIX, national)
}
