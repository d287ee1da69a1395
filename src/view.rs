//! Read-only projections of [`ConversationState`] for rendering.
//!
//! Nothing here mutates state; hosts call these every frame.

use crate::chat::{ConversationState, Message, Sender};

/// Text shown while a request is in flight.
pub const TYPING_INDICATOR: &str = "Assistant is typing...";

/// Whether the send button should be enabled.
pub fn can_send(state: &ConversationState) -> bool {
    !state.is_pending() && !state.draft().trim().is_empty()
}

/// Character counter for the input box, `"{n}/{max}"`. Hidden while the
/// draft is empty.
pub fn char_counter(state: &ConversationState, max_chars: usize) -> Option<String> {
    let count = state.draft().chars().count();
    (count > 0).then(|| format!("{count}/{max_chars}"))
}

/// Typing indicator, shown only while a request is pending.
pub fn typing_indicator(state: &ConversationState) -> Option<&'static str> {
    state.is_pending().then_some(TYPING_INDICATOR)
}

/// Accessible label for the toggle button.
pub fn toggle_label(state: &ConversationState) -> &'static str {
    if state.is_open() {
        "Close assistant"
    } else {
        "Open assistant"
    }
}

/// One rendered log line, e.g. `"Assistant: Hello!"`.
pub fn format_message(message: &Message) -> String {
    format!("{}: {}", message.sender().label(), message.text())
}

/// Render the whole log, one message per line, followed by the typing
/// indicator when a request is pending.
pub fn transcript(state: &ConversationState) -> Vec<String> {
    let mut lines: Vec<String> = state.messages().iter().map(format_message).collect();
    if let Some(indicator) = typing_indicator(state) {
        lines.push(indicator.to_string());
    }
    lines
}

/// Whether the message should be styled as the user's own.
pub fn is_own(message: &Message) -> bool {
    message.sender() == Sender::User
}
