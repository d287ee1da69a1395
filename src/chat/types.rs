//! Core message types for the chat log.

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sender {
    /// Text typed (or picked from a quick action) by the user.
    User,
    /// A reply from the assistant, or a synthetic reply describing a failure.
    Assistant,
}

impl Sender {
    /// Label used when rendering the log.
    pub fn label(self) -> &'static str {
        match self {
            Sender::User => "You",
            Sender::Assistant => "Assistant",
        }
    }
}

/// One entry in the message log. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    text: String,
    sender: Sender,
}

impl Message {
    pub(crate) fn user(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sender: Sender::User,
        }
    }

    pub(crate) fn assistant(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sender: Sender::Assistant,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn sender(&self) -> Sender {
        self.sender
    }
}

/// Whether the chat window is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Closed,
    Open,
}

impl Visibility {
    /// The state reached by a toggle.
    pub fn toggled(self) -> Self {
        match self {
            Visibility::Closed => Visibility::Open,
            Visibility::Open => Visibility::Closed,
        }
    }
}
