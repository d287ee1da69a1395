//! Tests for the conversation state, message types and quick actions.

use super::quick_actions::{QUICK_ACTIONS, find_quick_action};
use super::state::ConversationState;
use super::types::{Message, Sender, Visibility};
use crate::sanitize::sanitize;

#[test]
fn test_new_state() {
    let state = ConversationState::new();
    assert!(state.messages().is_empty());
    assert!(state.draft().is_empty());
    assert!(!state.is_pending());
    assert_eq!(state.visibility(), Visibility::Closed);
    assert!(!state.is_open());
}

#[test]
fn test_with_welcome_seeds_assistant_message() {
    let state = ConversationState::with_welcome("Hello!");
    assert_eq!(state.messages(), &[Message::assistant("Hello!")]);
    assert_eq!(state.count_from(Sender::Assistant), 1);
    assert_eq!(state.count_from(Sender::User), 0);
}

#[test]
fn test_messages_keep_append_order() {
    let mut state = ConversationState::new();
    state.add_user_message("first".to_string());
    state.add_assistant_message("second".to_string());
    state.add_user_message("third".to_string());

    let texts: Vec<&str> = state.messages().iter().map(Message::text).collect();
    assert_eq!(texts, ["first", "second", "third"]);
    assert_eq!(state.last_message().map(Message::sender), Some(Sender::User));
}

#[test]
fn test_draft_is_capped() {
    let mut state = ConversationState::new();
    state.set_draft("abcdef", 4);
    assert_eq!(state.draft(), "abcd");
    state.clear_draft();
    assert_eq!(state.draft(), "");
}

#[test]
fn test_draft_keeps_raw_text() {
    // The draft is what the user typed; sanitization happens on send.
    let mut state = ConversationState::new();
    state.set_draft("  <b>hi</b> ", 500);
    assert_eq!(state.draft(), "  <b>hi</b> ");
}

#[test]
fn test_visibility_toggle() {
    assert_eq!(Visibility::Closed.toggled(), Visibility::Open);
    assert_eq!(Visibility::Open.toggled(), Visibility::Closed);
    assert_eq!(Visibility::default(), Visibility::Closed);
}

#[test]
fn test_sender_labels() {
    assert_eq!(Sender::User.label(), "You");
    assert_eq!(Sender::Assistant.label(), "Assistant");
}

#[test]
fn test_quick_actions_are_already_clean() {
    assert_eq!(QUICK_ACTIONS.len(), 5);
    for action in QUICK_ACTIONS {
        assert_eq!(sanitize(action.message), action.message, "{}", action.label);
    }
}

#[test]
fn test_find_quick_action_ignores_case() {
    let action = find_quick_action(" moq ").unwrap();
    assert_eq!(action.message, "What is the minimum order quantity?");
    assert!(find_quick_action("Pricing").is_none());
}
