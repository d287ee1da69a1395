//! hub-chat-endpoint: the remote assistant contract.
//!
//! - [`protocol`] - JSON request and reply bodies
//! - [`error`] - [`EndpointError`], the failure taxonomy of one call
//! - [`http`] - [`HttpEndpoint`], the blocking `ureq` implementation
//!
//! Calls are synchronous; the controller runs them under
//! `tokio::task::spawn_blocking` and enforces its own deadline on top of the
//! agent's global timeout.

pub mod error;
pub mod http;
pub mod protocol;

pub use error::EndpointError;
pub use http::{HttpEndpoint, MAX_REPLY_SIZE};
pub use protocol::{AssistantReply, AssistantRequest};

/// A remote service that answers one user message with a reply and an
/// optional navigation command.
///
/// Implementations block until the call resolves. They must be shareable
/// across threads because each call runs on the blocking pool.
pub trait AssistantEndpoint: Send + Sync {
    /// Send `message` and wait for the decoded reply.
    fn ask(&self, message: &str) -> Result<AssistantReply, EndpointError>;
}
