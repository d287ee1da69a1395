//! Input sanitization for outbound user text.
//!
//! Every user message passes through here before it is stored in the log or
//! sent to the assistant endpoint.

use hub_chat_config::MAX_MESSAGE_LENGTH;

/// Normalize and bound raw user text using the default length cap.
///
/// Removes every `<` and `>`, keeps at most [`MAX_MESSAGE_LENGTH`]
/// characters, then trims surrounding whitespace. Idempotent.
pub fn sanitize(raw: &str) -> String {
    sanitize_with_limit(raw, MAX_MESSAGE_LENGTH)
}

/// Same as [`sanitize`] with an explicit cap, counted in Unicode scalar values.
pub fn sanitize_with_limit(raw: &str, max_chars: usize) -> String {
    let bounded: String = raw
        .chars()
        .filter(|c| !matches!(c, '<' | '>'))
        .take(max_chars)
        .collect();
    bounded.trim().to_string()
}

/// Sanitize text that arrived as raw bytes. Anything that is not valid
/// UTF-8 is not text and yields an empty string.
pub fn sanitize_bytes(raw: &[u8]) -> String {
    match std::str::from_utf8(raw) {
        Ok(text) => sanitize(text),
        Err(_) => String::new(),
    }
}
