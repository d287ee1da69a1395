//! Shared integration test helpers for hub-chat.
//!
//! Include this module at the top of each test file that needs it:
//!
//! ```ignore
//! mod common;
//! use common::{ScriptedEndpoint, RecordingNavigator, controller};
//! ```
//!
//! The `#[allow(dead_code)]` attribute suppresses warnings when only a
//! subset of helpers are used per file.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use hub_chat::controller::ConversationController;
use hub_chat::navigator::Navigator;
use hub_chat_config::AssistantConfig;
use hub_chat_endpoint::{AssistantEndpoint, AssistantReply, EndpointError};
use parking_lot::Mutex;
use tokio::runtime::Handle;

/// Fake endpoint that answers from a queue of scripted results.
///
/// Every call sleeps for `delay` first, then pops the next result. An
/// exhausted script answers with a transport failure.
pub struct ScriptedEndpoint {
    responses: Mutex<VecDeque<Result<AssistantReply, EndpointError>>>,
    received: Mutex<Vec<String>>,
    calls: AtomicUsize,
    delay: Duration,
}

impl ScriptedEndpoint {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            received: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
            delay: Duration::ZERO,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn reply(self, message: &str) -> Self {
        self.push(Ok(AssistantReply::text(message)))
    }

    pub fn reply_with_action(self, message: &str, action: &str) -> Self {
        self.push(Ok(AssistantReply::with_action(message, action)))
    }

    pub fn fail(self, err: EndpointError) -> Self {
        self.push(Err(err))
    }

    fn push(self, result: Result<AssistantReply, EndpointError>) -> Self {
        self.responses.lock().push_back(result);
        self
    }

    /// Number of calls that reached the endpoint.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Messages received, in call order.
    pub fn received(&self) -> Vec<String> {
        self.received.lock().clone()
    }
}

impl AssistantEndpoint for ScriptedEndpoint {
    fn ask(&self, message: &str) -> Result<AssistantReply, EndpointError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.received.lock().push(message.to_string());
        if !self.delay.is_zero() {
            std::thread::sleep(self.delay);
        }
        self.responses
            .lock()
            .pop_front()
            .unwrap_or_else(|| Err(EndpointError::Transport("script exhausted".to_string())))
    }
}

/// Navigator that records every page it was asked to open.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    pub pages: Vec<String>,
}

impl Navigator for RecordingNavigator {
    fn navigate(&mut self, page: &str) {
        self.pages.push(page.to_string());
    }
}

/// Config with no welcome seed, so the log starts empty.
pub fn quiet_config() -> AssistantConfig {
    AssistantConfig::new().with_welcome_message(None)
}

/// Controller over `endpoint` on the current tokio runtime.
pub fn controller(
    config: AssistantConfig,
    endpoint: Arc<ScriptedEndpoint>,
) -> ConversationController<RecordingNavigator> {
    ConversationController::new(
        config,
        endpoint,
        RecordingNavigator::default(),
        Handle::current(),
    )
}
