//! Building blocks for services that speak plain text over HTTP.
//!
//! # Overview
//! Two halves that share one convention. The reply half builds
//! `text/plain` responses for inbound requests, with `error_reply` also
//! logging the failure it answers. The send half PUTs and DELETEs plain
//! text payloads to other services, judging each response against an
//! optional status allowlist.
//!
//! # Design
//! - Replies are plain `http::Response<String>` values; any server stack
//!   built on the `http` types can convert them into its own body type.
//! - `Sender` is generic over `Transport`, so the full error surface runs
//!   under test without a live server.
//! - Every send makes exactly one attempt. Retry policy belongs to the
//!   caller.

pub mod client;
pub mod error;
pub mod reply;
pub mod transport;

pub use client::{send_delete, send_put, Sender};
pub use error::SendError;
pub use reply::{error_reply, text_reply};
pub use transport::{Transport, TransportError, UreqTransport};
