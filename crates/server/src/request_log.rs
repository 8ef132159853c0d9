//! Access log line per request: method, uri, status, response length and the
//! request body, the way the old morgan `:body` format printed them.

use axum::{
    body::{to_bytes, Body, HttpBody},
    extract::Request,
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::{info, warn};

/// Request bodies above this size are passed through without being logged.
pub const MAX_LOGGED_BODY: usize = 16 * 1024;

/// `-` for an empty body, the text for UTF-8, otherwise only the size.
pub fn format_body(bytes: &[u8]) -> String {
    if bytes.is_empty() {
        return "-".to_string();
    }
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => format!("<{} bytes>", bytes.len()),
    }
}

fn declared_len(req: &Request) -> Option<usize> {
    req.headers()
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok())
}

fn response_len(res: &Response) -> String {
    res.headers()
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .or_else(|| res.body().size_hint().exact().map(|n| n.to_string()))
        .unwrap_or_else(|| "-".to_string())
}

pub async fn log_request(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let uri = req.uri().clone();

    let (req, body) = match declared_len(&req) {
        Some(len) if len <= MAX_LOGGED_BODY => {
            let (parts, body) = req.into_parts();
            let bytes = match to_bytes(body, MAX_LOGGED_BODY).await {
                Ok(b) => b,
                Err(e) => {
                    warn!(%method, %uri, error = %e, "failed to read request body");
                    return StatusCode::BAD_REQUEST.into_response();
                }
            };
            let logged = format_body(&bytes);
            (Request::from_parts(parts, Body::from(bytes)), logged)
        }
        Some(len) => (req, format!("<{len} bytes>")),
        None => (req, "-".to_string()),
    };

    let res = next.run(req).await;
    info!(
        %method,
        %uri,
        status = res.status().as_u16(),
        content_length = %response_len(&res),
        body = %body,
        "request"
    );
    res
}
