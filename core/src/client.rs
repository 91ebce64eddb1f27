//! Fire-and-check senders for plain text payloads.
//!
//! # Design
//! `Sender` is generic over `Transport` so tests can exercise every path,
//! including transport failures, against canned responses. PUT and DELETE
//! share one private `send` routine parameterized by `http::Method`; the
//! two public methods differ only in the method they pass down. The free
//! `send_put` and `send_delete` functions serve callers that do not care
//! to hold a `Sender`, sharing one lazily built agent per process.

use std::sync::OnceLock;

use http::header::{self, HeaderValue};
use http::{Method, Request, StatusCode};

use crate::error::SendError;
use crate::transport::{Transport, UreqTransport};

/// Synchronous sender for plain text payloads.
///
/// Each call makes exactly one attempt: build the request, exchange it,
/// judge the response status. There are no retries.
#[derive(Debug, Clone)]
pub struct Sender<T = UreqTransport> {
    transport: T,
}

impl Sender {
    pub fn new() -> Self {
        Sender {
            transport: UreqTransport::new(),
        }
    }
}

impl Default for Sender {
    fn default() -> Self {
        Sender::new()
    }
}

impl<T: Transport> Sender<T> {
    pub fn with_transport(transport: T) -> Self {
        Sender { transport }
    }

    /// PUTs `message` to `url` as `text/plain`.
    ///
    /// `acceptable` lists the response statuses to treat as success;
    /// `None` accepts any status.
    pub fn send_put(
        &self,
        url: &str,
        message: &str,
        acceptable: Option<&[u16]>,
    ) -> Result<(), SendError> {
        self.send(Method::PUT, url, message, acceptable)
    }

    /// DELETEs `url` with `message` as a `text/plain` body.
    ///
    /// `acceptable` works as in `send_put`.
    pub fn send_delete(
        &self,
        url: &str,
        message: &str,
        acceptable: Option<&[u16]>,
    ) -> Result<(), SendError> {
        self.send(Method::DELETE, url, message, acceptable)
    }

    fn send(
        &self,
        method: Method,
        url: &str,
        message: &str,
        acceptable: Option<&[u16]>,
    ) -> Result<(), SendError> {
        let request = build_text_request(method.clone(), url, message)?;
        let response = self
            .transport
            .execute(request)
            .map_err(|source| SendError::Transport { method, source })?;
        check_status(response.status(), acceptable)
    }
}

fn build_text_request(
    method: Method,
    url: &str,
    message: &str,
) -> Result<Request<String>, SendError> {
    Request::builder()
        .method(method.clone())
        .uri(url)
        .header(header::CONTENT_TYPE, HeaderValue::from_static("text/plain"))
        .body(message.to_string())
        .map_err(|source| SendError::Construction { method, source })
}

/// Judge `status` against the allowlist. `None` accepts anything,
/// including server errors.
fn check_status(status: StatusCode, acceptable: Option<&[u16]>) -> Result<(), SendError> {
    let Some(acceptable) = acceptable else {
        return Ok(());
    };
    if acceptable.contains(&status.as_u16()) {
        return Ok(());
    }
    Err(SendError::UnacceptableStatus {
        status: status.as_u16(),
        acceptable: acceptable.to_vec(),
    })
}

fn default_sender() -> &'static Sender {
    static SENDER: OnceLock<Sender> = OnceLock::new();
    SENDER.get_or_init(Sender::new)
}

/// `Sender::send_put` on a process-wide default sender.
pub fn send_put(url: &str, message: &str, acceptable: Option<&[u16]>) -> Result<(), SendError> {
    default_sender().send_put(url, message, acceptable)
}

/// `Sender::send_delete` on a process-wide default sender.
pub fn send_delete(url: &str, message: &str, acceptable: Option<&[u16]>) -> Result<(), SendError> {
    default_sender().send_delete(url, message, acceptable)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::{Arc, Mutex};

    use http::Response;

    use crate::transport::TransportError;

    /// Transport answering every request with a fixed status and keeping
    /// the requests it saw.
    #[derive(Clone)]
    struct Recording {
        status: StatusCode,
        seen: Arc<Mutex<Vec<Request<String>>>>,
    }

    impl Recording {
        fn with_status(status: StatusCode) -> (Self, Arc<Mutex<Vec<Request<String>>>>) {
            let seen = Arc::new(Mutex::new(Vec::new()));
            (
                Recording {
                    status,
                    seen: Arc::clone(&seen),
                },
                seen,
            )
        }
    }

    impl Transport for Recording {
        fn execute(&self, request: Request<String>) -> Result<Response<String>, TransportError> {
            self.seen.lock().unwrap().push(request);
            let mut response = Response::new(String::new());
            *response.status_mut() = self.status;
            Ok(response)
        }
    }

    /// Transport failing every exchange, as if the host were down.
    struct Unreachable;

    impl Transport for Unreachable {
        fn execute(&self, _request: Request<String>) -> Result<Response<String>, TransportError> {
            Err(TransportError::new("connection refused"))
        }
    }

    #[test]
    fn send_put_builds_a_plain_text_put() {
        let (transport, seen) = Recording::with_status(StatusCode::OK);
        let sender = Sender::with_transport(transport);

        sender
            .send_put("http://localhost:3000/messages/greeting", "hello", None)
            .unwrap();

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        let request = &seen[0];
        assert_eq!(request.method(), Method::PUT);
        assert_eq!(request.uri(), "http://localhost:3000/messages/greeting");
        assert_eq!(
            request.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/plain"
        );
        assert_eq!(request.body(), "hello");
    }

    #[test]
    fn send_delete_uses_the_delete_method() {
        let (transport, seen) = Recording::with_status(StatusCode::OK);
        let sender = Sender::with_transport(transport);

        sender
            .send_delete("http://localhost:3000/messages/greeting", "bye", None)
            .unwrap();

        let seen = seen.lock().unwrap();
        assert_eq!(seen[0].method(), Method::DELETE);
        assert_eq!(seen[0].body(), "bye");
    }

    #[test]
    fn missing_allowlist_accepts_any_status() {
        let (transport, _seen) = Recording::with_status(StatusCode::INTERNAL_SERVER_ERROR);
        let sender = Sender::with_transport(transport);

        assert!(sender.send_put("http://localhost:3000/x", "m", None).is_ok());
    }

    #[test]
    fn allowlisted_status_is_accepted() {
        for status in [StatusCode::OK, StatusCode::CREATED] {
            let (transport, _seen) = Recording::with_status(status);
            let sender = Sender::with_transport(transport);

            let result = sender.send_put("http://localhost:3000/x", "m", Some(&[200, 201]));
            assert!(result.is_ok(), "status {status} should be acceptable");
        }
    }

    #[test]
    fn status_outside_the_allowlist_is_rejected() {
        let (transport, _seen) = Recording::with_status(StatusCode::NOT_FOUND);
        let sender = Sender::with_transport(transport);

        let err = sender
            .send_put("http://localhost:3000/x", "m", Some(&[200, 201]))
            .unwrap_err();

        match &err {
            SendError::UnacceptableStatus { status, acceptable } => {
                assert_eq!(*status, 404);
                assert_eq!(acceptable, &[200, 201]);
            }
            other => panic!("expected UnacceptableStatus, got {other:?}"),
        }
        assert_eq!(
            err.to_string(),
            "unexpected response status 404, acceptable statuses are [200, 201]"
        );
    }

    #[test]
    fn empty_allowlist_rejects_every_status() {
        let (transport, _seen) = Recording::with_status(StatusCode::OK);
        let sender = Sender::with_transport(transport);

        let err = sender
            .send_put("http://localhost:3000/x", "m", Some(&[]))
            .unwrap_err();
        assert!(matches!(
            err,
            SendError::UnacceptableStatus { status: 200, .. }
        ));
    }

    #[test]
    fn malformed_url_is_a_construction_error() {
        let (transport, seen) = Recording::with_status(StatusCode::OK);
        let sender = Sender::with_transport(transport);

        let err = sender
            .send_put("http://exa mple.com/x", "m", None)
            .unwrap_err();

        assert!(matches!(err, SendError::Construction { .. }));
        assert!(err
            .to_string()
            .starts_with("error while creating PUT request"));
        assert!(seen.lock().unwrap().is_empty());
    }

    #[test]
    fn unreachable_host_is_a_transport_error() {
        let sender = Sender::with_transport(Unreachable);

        let err = sender
            .send_delete("http://localhost:3000/x", "m", Some(&[200]))
            .unwrap_err();

        assert!(matches!(err, SendError::Transport { .. }));
        assert!(err
            .to_string()
            .starts_with("error while sending DELETE request"));
    }
}
