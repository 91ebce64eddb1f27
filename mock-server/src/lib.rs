use std::{collections::HashMap, sync::Arc};

use axum::{
    body::Body,
    extract::{Path, Request, State},
    http::{self, header, request::Parts, HeaderMap, StatusCode},
    response::Response,
    routing::{get, put},
    Router,
};
use plainwire_core::{error_reply, text_reply};
use tokio::{net::TcpListener, sync::RwLock};

pub type Board = Arc<RwLock<HashMap<String, String>>>;

pub fn app() -> Router {
    let board: Board = Arc::new(RwLock::new(HashMap::new()));
    Router::new()
        .route(
            "/messages/{name}",
            get(read_message).put(store_message).delete(remove_message),
        )
        .route("/status/{code}", put(echo_status).delete(echo_status))
        .with_state(board)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn read_message(
    State(board): State<Board>,
    Path(name): Path<String>,
    request: Request,
) -> Response {
    let board = board.read().await;
    match board.get(&name) {
        Some(message) => text_reply(StatusCode::OK, message).map(Body::from),
        None => error_reply(&request, StatusCode::NOT_FOUND, "no such message").map(Body::from),
    }
}

async fn store_message(
    State(board): State<Board>,
    Path(name): Path<String>,
    parts: Parts,
    body: String,
) -> Response {
    let request = http::Request::from_parts(parts, ());
    if !is_plain_text(request.headers()) {
        return error_reply(
            &request,
            StatusCode::UNSUPPORTED_MEDIA_TYPE,
            "message body must be text/plain",
        )
        .map(Body::from);
    }
    let previous = board.write().await.insert(name, body);
    match previous {
        None => text_reply(StatusCode::CREATED, "created").map(Body::from),
        Some(_) => text_reply(StatusCode::OK, "updated").map(Body::from),
    }
}

async fn remove_message(
    State(board): State<Board>,
    Path(name): Path<String>,
    request: Request,
) -> Response {
    match board.write().await.remove(&name) {
        Some(_) => text_reply(StatusCode::OK, "deleted").map(Body::from),
        None => error_reply(&request, StatusCode::NOT_FOUND, "no such message").map(Body::from),
    }
}

async fn echo_status(Path(code): Path<u16>, request: Request) -> Response {
    match StatusCode::from_u16(code) {
        Ok(status) => {
            let mut response = Response::new(Body::empty());
            *response.status_mut() = status;
            response
        }
        Err(_) => {
            error_reply(&request, StatusCode::BAD_REQUEST, "not an HTTP status").map(Body::from)
        }
    }
}

fn is_plain_text(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("text/plain"))
}
