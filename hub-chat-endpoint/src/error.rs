//! Failure taxonomy for one endpoint call.

use thiserror::Error;

/// Why a call to the assistant endpoint did not produce a reply.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EndpointError {
    /// No response arrived within the deadline.
    #[error("request timed out")]
    Timeout,

    /// The endpoint answered with a non-success status code.
    #[error("HTTP error: {status}")]
    Status {
        /// HTTP status code of the response.
        status: u16,
    },

    /// The endpoint could not be reached or the connection failed mid-call.
    #[error("transport failure: {0}")]
    Transport(String),

    /// The body could not be decoded as an assistant reply.
    #[error("malformed reply body: {0}")]
    Malformed(String),
}

impl EndpointError {
    /// `429 Too Many Requests`.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, EndpointError::Status { status: 429 })
    }
}
