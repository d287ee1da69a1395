//! HTTP implementation of [`AssistantEndpoint`] with native-tls support.
//!
//! Uses the system TLS library (Schannel on Windows, OpenSSL on Linux,
//! Security.framework on macOS) and the platform's root certificates.

use std::io;
use std::time::Duration;

use ureq::Agent;
use ureq::tls::{RootCerts, TlsConfig, TlsProvider};

use crate::AssistantEndpoint;
use crate::error::EndpointError;
use crate::protocol::{AssistantReply, AssistantRequest};

/// Maximum reply body size (1 MiB).
pub const MAX_REPLY_SIZE: u64 = 1024 * 1024;

/// Create a new HTTP agent configured with native-tls and a global timeout.
pub fn agent(timeout: Duration) -> Agent {
    let tls_config = TlsConfig::builder()
        .provider(TlsProvider::NativeTls)
        .root_certs(RootCerts::PlatformVerifier)
        .build();

    Agent::config_builder()
        .tls_config(tls_config)
        .timeout_global(Some(timeout))
        .build()
        .into()
}

/// Assistant endpoint reached with `POST <url>` and JSON bodies.
pub struct HttpEndpoint {
    agent: Agent,
    url: String,
}

impl HttpEndpoint {
    /// Create an endpoint whose agent gives up after `timeout`.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            agent: agent(timeout),
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl AssistantEndpoint for HttpEndpoint {
    fn ask(&self, message: &str) -> Result<AssistantReply, EndpointError> {
        let body = serde_json::to_string(&AssistantRequest::new(message))
            .map_err(|e| EndpointError::Transport(format!("failed to encode request: {e}")))?;

        log::debug!("POST {} ({} bytes)", self.url, body.len());

        let mut response = self
            .agent
            .post(self.url.as_str())
            .header("Content-Type", "application/json")
            .header("Accept", "application/json")
            .send(body.as_bytes())
            .map_err(classify_error)?;

        let text = response
            .body_mut()
            .with_config()
            .limit(MAX_REPLY_SIZE)
            .read_to_string()
            .map_err(|e| match e {
                ureq::Error::BodyExceedsLimit(limit) => {
                    EndpointError::Malformed(format!("reply body exceeds {limit} bytes"))
                }
                other => classify_error(other),
            })?;

        decode_reply(&text)
    }
}

/// Decode a reply body, mapping any shape mismatch to
/// [`EndpointError::Malformed`].
pub fn decode_reply(body: &str) -> Result<AssistantReply, EndpointError> {
    serde_json::from_str(body).map_err(|e| EndpointError::Malformed(e.to_string()))
}

/// Map a `ureq` failure onto the endpoint taxonomy.
fn classify_error(err: ureq::Error) -> EndpointError {
    match err {
        ureq::Error::StatusCode(status) => EndpointError::Status { status },
        ureq::Error::Timeout(_) => EndpointError::Timeout,
        ureq::Error::Io(e) if e.kind() == io::ErrorKind::TimedOut => EndpointError::Timeout,
        other => EndpointError::Transport(other.to_string()),
    }
}
