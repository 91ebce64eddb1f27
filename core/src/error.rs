//! Error types for the send helpers.
//!
//! # Design
//! A send fails in one of three stages, checked in order. `Construction`
//! covers request building, before anything touches the network.
//! `Transport` covers the wire itself. `UnacceptableStatus` means the
//! exchange completed but the response status was not on the caller's
//! allowlist; it keeps the raw status and the full allowlist so the
//! caller can report both.

use std::fmt;

use http::Method;

use crate::transport::TransportError;

/// Errors returned by `Sender` send methods.
#[derive(Debug)]
pub enum SendError {
    /// The request could not be built from the given URL.
    Construction { method: Method, source: http::Error },

    /// The request was built but could not be exchanged with the server.
    Transport {
        method: Method,
        source: TransportError,
    },

    /// The server responded with a status outside the allowlist.
    UnacceptableStatus { status: u16, acceptable: Vec<u16> },
}

impl fmt::Display for SendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SendError::Construction { method, source } => {
                write!(f, "error while creating {method} request: {source}")
            }
            SendError::Transport { method, source } => {
                write!(f, "error while sending {method} request: {source}")
            }
            SendError::UnacceptableStatus { status, acceptable } => {
                write!(
                    f,
                    "unexpected response status {status}, acceptable statuses are {acceptable:?}"
                )
            }
        }
    }
}

impl std::error::Error for SendError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SendError::Construction { source, .. } => Some(source),
            SendError::Transport { source, .. } => Some(source),
            SendError::UnacceptableStatus { .. } => None,
        }
    }
}
