use std::collections::BTreeMap;
use std::time::Duration;

use axum::{
    extract::Path,
    http::{header, HeaderMap, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{any, get},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tracing::debug;

/// What `/echo` saw: the request's method, headers and body.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Echo {
    pub method: String,
    /// Lowercased header names; repeated headers are comma-joined.
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

pub fn app() -> Router {
    Router::new()
        .route("/echo", any(echo))
        .route("/status/{code}", any(status))
        .route("/redirect/{hops}", get(redirect))
        .route("/delay/{ms}", get(delay))
        .route("/bytes/{len}", get(bytes))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

/// Body length the stalling server announces in its response head.
pub const STALL_CONTENT_LENGTH: usize = 100;

/// Answers every connection with a `200` head announcing
/// `STALL_CONTENT_LENGTH` bytes, writes only a few of them, then holds the
/// socket open for `hold` without sending the rest.
pub async fn run_stalling(listener: TcpListener, hold: Duration) -> Result<(), std::io::Error> {
    loop {
        let (mut socket, _) = listener.accept().await?;
        tokio::spawn(async move {
            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf).await;
            let head = format!(
                "HTTP/1.1 200 OK\r\ncontent-type: text/plain\r\ncontent-length: {STALL_CONTENT_LENGTH}\r\n\r\n"
            );
            if socket.write_all(head.as_bytes()).await.is_err() {
                return;
            }
            let _ = socket.write_all(b"partial").await;
            let _ = socket.flush().await;
            debug!(?hold, "stalling mid-body");
            tokio::time::sleep(hold).await;
        });
    }
}

async fn echo(method: Method, headers: HeaderMap, body: String) -> Json<Echo> {
    let mut seen: BTreeMap<String, String> = BTreeMap::new();
    for (name, value) in headers.iter() {
        let value = String::from_utf8_lossy(value.as_bytes()).into_owned();
        seen.entry(name.as_str().to_string())
            .and_modify(|v| {
                v.push(',');
                v.push_str(&value);
            })
            .or_insert(value);
    }
    debug!(%method, headers = seen.len(), body_len = body.len(), "echo");
    Json(Echo {
        method: method.to_string(),
        headers: seen,
        body,
    })
}

async fn status(Path(code): Path<u16>) -> Response {
    match StatusCode::from_u16(code) {
        Ok(status) => (status, format!("status {code}")).into_response(),
        Err(_) => StatusCode::BAD_REQUEST.into_response(),
    }
}

/// `302` to `/redirect/{hops - 1}` until `hops` reaches zero.
async fn redirect(Path(hops): Path<u32>) -> Response {
    if hops == 0 {
        return (StatusCode::OK, "done").into_response();
    }
    let location = format!("/redirect/{}", hops - 1);
    (StatusCode::FOUND, [(header::LOCATION, location)]).into_response()
}

async fn bytes(Path(len): Path<usize>) -> Vec<u8> {
    vec![b'x'; len]
}

async fn delay(Path(ms): Path<u64>) -> &'static str {
    tokio::time::sleep(Duration::from_millis(ms)).await;
    "slept"
}
