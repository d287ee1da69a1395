//! Chat data model for the assistant widget.
//!
//! Sub-modules:
//! - [`state`]         - `ConversationState`: message log, pending flag, draft, visibility
//! - [`types`]         - `Message`, `Sender` and `Visibility`
//! - [`quick_actions`] - canned inputs offered as one-click shortcuts

pub mod quick_actions;
mod state;
mod types;

#[cfg(test)]
mod tests;

pub use quick_actions::{QUICK_ACTIONS, QuickAction, find_quick_action};
pub use state::ConversationState;
pub use types::{Message, Sender, Visibility};
