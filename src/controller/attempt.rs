//! Per-request bookkeeping for the conversation controller.

use hub_chat_endpoint::{AssistantReply, EndpointError};
use tokio::task::JoinHandle;

/// Identifier of one dispatched request. Monotonic per controller.
pub type AttemptId = u64;

/// The single live request of a controller.
#[derive(Debug)]
pub(crate) struct RequestAttempt {
    pub id: AttemptId,
    pub handle: JoinHandle<()>,
}

/// Message sent from the request task back to the controller.
#[derive(Debug)]
pub struct AttemptUpdate {
    /// The attempt this update belongs to.
    pub attempt_id: AttemptId,
    pub outcome: AttemptOutcome,
}

/// How a request attempt ended.
#[derive(Debug)]
pub enum AttemptOutcome {
    Replied(AssistantReply),
    Failed(EndpointError),
}

/// User-facing failure categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Timeout,
    Network,
    RateLimited,
}

impl FailureKind {
    /// Classify a technical endpoint error.
    pub fn classify(err: &EndpointError) -> Self {
        match err {
            EndpointError::Timeout => FailureKind::Timeout,
            e if e.is_rate_limited() => FailureKind::RateLimited,
            EndpointError::Status { .. }
            | EndpointError::Transport(_)
            | EndpointError::Malformed(_) => FailureKind::Network,
        }
    }

    /// Text of the synthetic assistant message shown for this failure.
    pub fn user_message(self) -> &'static str {
        match self {
            FailureKind::Timeout => "Request timed out. Please try again.",
            FailureKind::Network => "Network error. Please try again.",
            FailureKind::RateLimited => "Too many requests. Please wait a moment.",
        }
    }
}
