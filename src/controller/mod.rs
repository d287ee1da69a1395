//! Conversation controller: the only writer of [`ConversationState`].
//!
//! [`ConversationController`] validates and records user input, dispatches
//! one request at a time to an [`AssistantEndpoint`], and folds the result
//! back into the log. Network work runs on a tokio runtime: each request is
//! a spawned task that races the blocking endpoint call (on the blocking
//! pool) against the configured deadline and sends exactly one
//! [`AttemptUpdate`] over an mpsc channel. The host drains that channel with
//! [`ConversationController::poll`] from its event loop, or awaits
//! [`ConversationController::wait_for_reply`].
//!
//! Sub-modules:
//! - [`attempt`] - attempt ids, updates and the user-facing failure taxonomy

pub mod attempt;


use std::sync::Arc;

use hub_chat_config::AssistantConfig;
use hub_chat_endpoint::{AssistantEndpoint, AssistantReply, EndpointError};
use tokio::runtime::Handle;
use tokio::sync::mpsc;

use crate::chat::{ConversationState, QuickAction, Visibility, find_quick_action};
use crate::input::{KeyOutcome, WidgetKey};
use crate::navigator::Navigator;
use crate::sanitize::sanitize_with_limit;

pub use attempt::{AttemptId, AttemptOutcome, AttemptUpdate, FailureKind};
use attempt::RequestAttempt;

/// Result of a `send` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    /// The message was recorded and a request is in flight.
    Dispatched { attempt_id: AttemptId },
    /// Nothing was left after sanitization.
    RejectedEmpty,
    /// A previous request has not resolved yet.
    RejectedPending,
}

impl SendOutcome {
    pub fn is_dispatched(self) -> bool {
        matches!(self, SendOutcome::Dispatched { .. })
    }
}

/// Owns the conversation state for one widget and mediates every change
/// to it.
pub struct ConversationController<N: Navigator> {
    config: AssistantConfig,
    state: ConversationState,
    endpoint: Arc<dyn AssistantEndpoint>,
    navigator: N,
    runtime: Handle,
    /// Channel sender (cloned into request tasks).
    update_tx: mpsc::UnboundedSender<AttemptUpdate>,
    /// Channel receiver for updates from request tasks.
    update_rx: mpsc::UnboundedReceiver<AttemptUpdate>,
    /// The live, unresolved request, if any.
    attempt: Option<RequestAttempt>,
    next_attempt_id: AttemptId,
    /// Set when the widget opens; consumed by the presentation layer.
    focus_requested: bool,
}

impl<N: Navigator> ConversationController<N> {
    /// Create a controller. The log is seeded with the configured welcome
    /// message, if any.
    pub fn new(
        config: AssistantConfig,
        endpoint: Arc<dyn AssistantEndpoint>,
        navigator: N,
        runtime: Handle,
    ) -> Self {
        let state = match config.welcome_message.as_deref() {
            Some(welcome) if !welcome.trim().is_empty() => ConversationState::with_welcome(welcome),
            _ => ConversationState::new(),
        };
        let (update_tx, update_rx) = mpsc::unbounded_channel();
        Self {
            config,
            state,
            endpoint,
            navigator,
            runtime,
            update_tx,
            update_rx,
            attempt: None,
            next_attempt_id: 1,
            focus_requested: false,
        }
    }

    pub fn state(&self) -> &ConversationState {
        &self.state
    }

    pub fn config(&self) -> &AssistantConfig {
        &self.config
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    pub fn navigator_mut(&mut self) -> &mut N {
        &mut self.navigator
    }

    /// Id of the live request, if one is in flight.
    pub fn live_attempt(&self) -> Option<AttemptId> {
        self.attempt.as_ref().map(|attempt| attempt.id)
    }

    /// Submit user text.
    ///
    /// The text is sanitized first. Empty results and sends while a request
    /// is pending are rejected without touching state.
    pub fn send(&mut self, candidate: &str) -> SendOutcome {
        let text = sanitize_with_limit(candidate, self.config.max_message_length);
        if text.is_empty() {
            crate::debug_log!("CHAT", "Send rejected: empty after sanitization");
            return SendOutcome::RejectedEmpty;
        }
        if self.state.is_pending() {
            crate::debug_log!("CHAT", "Send rejected: request already pending");
            return SendOutcome::RejectedPending;
        }

        self.state.add_user_message(text.clone());
        self.state.clear_draft();
        self.state.set_pending(true);

        let attempt_id = self.dispatch(text);
        SendOutcome::Dispatched { attempt_id }
    }

    /// Submit the current draft.
    pub fn send_draft(&mut self) -> SendOutcome {
        let draft = self.state.draft().to_string();
        self.send(&draft)
    }

    /// Send the canned text behind a quick-action label.
    ///
    /// Returns `None` when no quick action has that label.
    pub fn send_quick_action(&mut self, label: &str) -> Option<SendOutcome> {
        let QuickAction { message, .. } = find_quick_action(label)?;
        Some(self.send(message))
    }

    /// Replace the draft input, capped at the message length limit.
    pub fn set_draft(&mut self, text: &str) {
        self.state.set_draft(text, self.config.max_message_length);
    }

    /// Flip the widget between open and closed.
    pub fn toggle(&mut self) {
        let next = self.state.visibility().toggled();
        self.state.set_visibility(next);
        if next == Visibility::Open {
            self.focus_requested = true;
        }
        crate::debug_info!("CHAT", "Widget toggled to {:?}", next);
    }

    /// Close the widget (escape). No-op when already closed.
    ///
    /// Returns whether the widget was open.
    pub fn close(&mut self) -> bool {
        if !self.state.is_open() {
            return false;
        }
        self.state.set_visibility(Visibility::Closed);
        crate::debug_info!("CHAT", "Widget closed");
        true
    }

    /// Consume the one-shot request to focus the input box.
    pub fn take_focus_request(&mut self) -> bool {
        std::mem::take(&mut self.focus_requested)
    }

    /// Handle a key press aimed at the widget.
    pub fn handle_key(&mut self, key: WidgetKey) -> KeyOutcome {
        match key {
            WidgetKey::Enter => KeyOutcome::Submitted(self.send_draft()),
            WidgetKey::ShiftEnter => KeyOutcome::Ignored,
            WidgetKey::Escape => {
                if self.close() {
                    KeyOutcome::Closed
                } else {
                    KeyOutcome::Ignored
                }
            }
        }
    }

    /// Apply every update that has already arrived (non-blocking).
    ///
    /// Returns the number of updates applied to state.
    pub fn poll(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(update) = self.update_rx.try_recv() {
            if self.apply_update(update) {
                applied += 1;
            }
        }
        applied
    }

    /// Wait until the live request resolves and apply its outcome.
    ///
    /// Returns `false` immediately when nothing is in flight.
    pub async fn wait_for_reply(&mut self) -> bool {
        while self.attempt.is_some() {
            match self.update_rx.recv().await {
                Some(update) => {
                    if self.apply_update(update) {
                        return true;
                    }
                }
                None => break,
            }
        }
        false
    }

    /// Spawn the request task for `text` and record it as the live attempt.
    fn dispatch(&mut self, text: String) -> AttemptId {
        let attempt_id = self.next_attempt_id;
        self.next_attempt_id += 1;

        let tx = self.update_tx.clone();
        let endpoint = Arc::clone(&self.endpoint);
        let deadline = self.config.timeout;

        crate::debug_info!(
            "CHAT",
            "Dispatching attempt {} ({} chars, deadline {}ms)",
            attempt_id,
            text.chars().count(),
            self.config.timeout_ms()
        );

        let handle = self.runtime.spawn(async move {
            // ureq is synchronous, so the call runs on the blocking pool
            let call = tokio::task::spawn_blocking(move || endpoint.ask(&text));
            let outcome = match tokio::time::timeout(deadline, call).await {
                Ok(Ok(Ok(reply))) => AttemptOutcome::Replied(reply),
                Ok(Ok(Err(e))) => AttemptOutcome::Failed(e),
                Ok(Err(e)) => {
                    log::error!("Assistant request task panicked: {}", e);
                    AttemptOutcome::Failed(EndpointError::Transport(e.to_string()))
                }
                Err(_) => AttemptOutcome::Failed(EndpointError::Timeout),
            };
            // Receiver dropped means the controller is gone
            let _ = tx.send(AttemptUpdate {
                attempt_id,
                outcome,
            });
        });

        self.attempt = Some(RequestAttempt {
            id: attempt_id,
            handle,
        });
        attempt_id
    }

    /// Fold one update into state. Updates for anything but the live
    /// attempt are dropped.
    fn apply_update(&mut self, update: AttemptUpdate) -> bool {
        if self.live_attempt() != Some(update.attempt_id) {
            crate::debug_log!(
                "CHAT",
                "Dropping update for stale attempt {}",
                update.attempt_id
            );
            return false;
        }
        self.attempt = None;
        self.state.set_pending(false);

        match update.outcome {
            AttemptOutcome::Replied(reply) => self.apply_reply(update.attempt_id, reply),
            AttemptOutcome::Failed(err) => {
                let kind = FailureKind::classify(&err);
                log::warn!("Assistant request {} failed: {}", update.attempt_id, err);
                crate::debug_error!(
                    "CHAT",
                    "Attempt {} failed ({:?}): {}",
                    update.attempt_id,
                    kind,
                    err
                );
                self.state.add_assistant_message(kind.user_message().to_string());
            }
        }
        true
    }

    fn apply_reply(&mut self, attempt_id: AttemptId, reply: AssistantReply) {
        crate::debug_info!(
            "CHAT",
            "Attempt {} replied ({} chars, action={:?})",
            attempt_id,
            reply.message.chars().count(),
            reply.action
        );
        let page = reply.navigation_target().map(str::to_owned);
        self.state.add_assistant_message(reply.message);
        if let Some(page) = page {
            self.navigator.navigate(&page);
        }
    }
}

impl<N: Navigator> Drop for ConversationController<N> {
    fn drop(&mut self) {
        if let Some(attempt) = self.attempt.take() {
            crate::debug_log!("CHAT", "Aborting live attempt {} on drop", attempt.id);
            attempt.handle.abort();
        }
    }
}
