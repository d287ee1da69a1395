//! Fixed widget constants and serde default helpers.

use std::time::Duration;

/// Fallback assistant endpoint used when neither the config file nor the
/// environment provides one.
pub const DEFAULT_ENDPOINT_URL: &str = "http://127.0.0.1:5000/chat";

/// Environment variable that overrides the endpoint URL at deploy time.
pub const API_URL_ENV_VAR: &str = "HUB_CHAT_API_URL";

/// Maximum length of an outbound user message, in characters.
pub const MAX_MESSAGE_LENGTH: usize = 500;

/// Request deadline in milliseconds.
pub const REQUEST_TIMEOUT_MS: u64 = 10_000;

/// Request deadline as a [`Duration`].
pub const REQUEST_TIMEOUT: Duration = Duration::from_millis(REQUEST_TIMEOUT_MS);

/// Greeting seeded as the first assistant message of a session.
pub const WELCOME_MESSAGE: &str =
    "Hello! I can help with MOQ, Pricing, Shipping, or Navigation. What do you need?";

pub(crate) fn endpoint_url() -> String {
    DEFAULT_ENDPOINT_URL.to_string()
}

pub(crate) fn timeout() -> Duration {
    REQUEST_TIMEOUT
}

pub(crate) fn max_message_length() -> usize {
    MAX_MESSAGE_LENGTH
}

pub(crate) fn welcome_message() -> Option<String> {
    Some(WELCOME_MESSAGE.to_string())
}
