//! Outbound HTTP transport.
//!
//! `Transport` is the seam between the send helpers and the network:
//! production code goes through `UreqTransport`, tests swap in a fake
//! that returns canned responses without opening a socket.

use std::fmt;

use http::{Request, Response};
use ureq::Agent;

/// A synchronous exchange of one request for one response.
pub trait Transport {
    /// Sends `request` and reads the full response body as text.
    fn execute(&self, request: Request<String>) -> Result<Response<String>, TransportError>;
}

/// Failure to exchange a request with the server.
#[derive(Debug)]
pub struct TransportError {
    message: String,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        TransportError {
            message: message.into(),
        }
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for TransportError {}

/// `Transport` backed by a blocking `ureq` agent.
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: Agent,
}

impl UreqTransport {
    /// Creates a transport whose agent treats every response status as a
    /// plain response rather than an error.
    pub fn new() -> Self {
        let agent = Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        UreqTransport { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        UreqTransport::new()
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: Request<String>) -> Result<Response<String>, TransportError> {
        let response = self
            .agent
            .run(request)
            .map_err(|e| TransportError::new(e.to_string()))?;
        let (parts, mut body) = response.into_parts();
        let text = body
            .read_to_string()
            .map_err(|e| TransportError::new(e.to_string()))?;
        Ok(Response::from_parts(parts, text))
    }
}
