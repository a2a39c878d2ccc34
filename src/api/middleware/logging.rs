//! Request/response logging middleware

use std::time::Instant;

use axum::{
    body::Body,
    extract::MatchedPath,
    http::{header::HeaderName, Request},
    middleware::Next,
    response::Response,
};
use tracing::{info, warn};

pub const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Logs one line per completed request. Relies on `TraceLayer` for spans and
/// on the request-id layer having set `x-request-id`.
pub async fn logging_middleware(request: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let uri = request.uri().clone();
    let path = extract_path(&request);
    let request_id = extract_request_id(&request);

    let response = next.run(request).await;

    let duration_ms = start.elapsed().as_millis() as u64;
    let status = response.status();

    if status.is_server_error() {
        warn!(
            method = %method,
            path = %path,
            uri = %uri,
            status = status.as_u16(),
            duration_ms,
            request_id = %request_id,
            "Request failed"
        );
    } else {
        info!(
            method = %method,
            path = %path,
            uri = %uri,
            status = status.as_u16(),
            duration_ms,
            request_id = %request_id,
            "Request completed"
        );
    }

    response
}

fn extract_path(request: &Request<Body>) -> String {
    request
        .extensions()
        .get::<MatchedPath>()
        .map(|mp| mp.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string())
}

fn extract_request_id(request: &Request<Body>) -> String {
    request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-")
        .to_string()
}
