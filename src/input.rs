//! Keyboard input aimed at the chat widget.

use crate::controller::SendOutcome;

/// Keys the widget reacts to. Everything else goes to the draft editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetKey {
    /// Submit the draft.
    Enter,
    /// Reserved for multi-line input; currently does nothing.
    ShiftEnter,
    /// Close the widget if it is open.
    Escape,
}

/// What a key press did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Submitted(SendOutcome),
    Closed,
    Ignored,
}

impl WidgetKey {
    /// Map a terminal key name (as printed by line-oriented hosts) to a
    /// widget key.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "enter" | "return" => Some(WidgetKey::Enter),
            "shift+enter" | "shift+return" => Some(WidgetKey::ShiftEnter),
            "escape" | "esc" => Some(WidgetKey::Escape),
            _ => None,
        }
    }
}
