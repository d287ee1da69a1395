//! Wire types for the assistant endpoint.
//!
//! Request: `{"message": "..."}`. Reply: `{"message": "...", "action": "..."}`
//! where `action` may be absent, `null`, or a page identifier.

use serde::{Deserialize, Serialize};

/// Body of `POST <endpoint_url>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssistantRequest {
    pub message: String,
}

impl AssistantRequest {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Decoded reply body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssistantReply {
    /// Text shown to the user as the assistant's turn.
    pub message: String,
    /// Opaque page identifier for the host navigator.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
}

impl AssistantReply {
    /// A reply with no navigation command.
    pub fn text(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            action: None,
        }
    }

    /// A reply that also asks the host to switch to `page`.
    pub fn with_action(message: impl Into<String>, page: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            action: Some(page.into()),
        }
    }

    /// The navigation command, if present and non-empty.
    pub fn navigation_target(&self) -> Option<&str> {
        self.action.as_deref().filter(|page| !page.is_empty())
    }
}
