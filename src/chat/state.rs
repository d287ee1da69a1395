//! `ConversationState` - the message log, in-flight flag, draft input and
//! window visibility for one widget session.
//!
//! Only the controller mutates this; everything else gets `&ConversationState`.

use super::types::{Message, Sender, Visibility};

/// Conversation state for one widget session.
#[derive(Debug, Clone, Default)]
pub struct ConversationState {
    /// Append-only message log.
    messages: Vec<Message>,
    /// True between request dispatch and its resolution.
    pending_request: bool,
    /// Text typed into the input box but not yet sent.
    draft_input: String,
    /// Open/closed window state.
    visibility: Visibility,
}

impl ConversationState {
    /// Create an empty, closed state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a state whose log starts with an assistant greeting.
    pub fn with_welcome(welcome: impl Into<String>) -> Self {
        let mut state = Self::new();
        state.add_assistant_message(welcome.into());
        state
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn is_pending(&self) -> bool {
        self.pending_request
    }

    pub fn draft(&self) -> &str {
        &self.draft_input
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn is_open(&self) -> bool {
        self.visibility == Visibility::Open
    }

    /// Number of messages authored by `sender`.
    pub fn count_from(&self, sender: Sender) -> usize {
        self.messages
            .iter()
            .filter(|msg| msg.sender() == sender)
            .count()
    }

    pub(crate) fn add_user_message(&mut self, text: String) {
        self.messages.push(Message::user(text));
    }

    pub(crate) fn add_assistant_message(&mut self, text: String) {
        self.messages.push(Message::assistant(text));
    }

    pub(crate) fn set_pending(&mut self, pending: bool) {
        self.pending_request = pending;
    }

    /// Replace the draft, keeping at most `max_chars` characters.
    pub(crate) fn set_draft(&mut self, text: &str, max_chars: usize) {
        self.draft_input = text.chars().take(max_chars).collect();
    }

    pub(crate) fn clear_draft(&mut self) {
        self.draft_input.clear();
    }

    pub(crate) fn set_visibility(&mut self, visibility: Visibility) {
        self.visibility = visibility;
    }
}
