//! Plain text HTTP responses.
//!
//! # Design
//! Both helpers return a fresh `http::Response<String>` instead of writing
//! into a caller-supplied sink, so a handler cannot half-write a response
//! and then change its mind about the status. `error_reply` is
//! `text_reply` plus a log line; the body a client sees is identical
//! either way.

use http::header::{self, HeaderValue};
use http::{Request, Response, StatusCode};
use tracing::error;

/// Builds a `text/plain` response with the given status. The body is
/// `content` followed by a trailing newline.
pub fn text_reply(status: StatusCode, content: &str) -> Response<String> {
    let mut response = Response::new(format!("{content}\n"));
    *response.status_mut() = status;
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/plain"),
    );
    response
}

/// Logs the failure and builds a `text/plain` response carrying `message`.
///
/// The log line has the shape `<url> <method>: Error <status> <message>`,
/// taking the URL and method from the request being answered.
pub fn error_reply<B>(request: &Request<B>, status: StatusCode, message: &str) -> Response<String> {
    error!(
        "{} {}: Error {} {}",
        request.uri(),
        request.method(),
        status.as_u16(),
        message
    );
    text_reply(status, message)
}
