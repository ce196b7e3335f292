//! Transparent path-prefix proxy
//!
//! Each mounted prefix forwards the whole request to one upstream base
//! URL with the full original path preserved. The gateway relays method,
//! headers, query and body both ways without interpreting any of them;
//! in particular auth headers pass through untouched for the resource
//! services to judge.

use axum::{
    body::{to_bytes, Body},
    extract::{OriginalUri, Request, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json, Router,
};
use serde_json::json;
use std::time::Duration;

/// Largest request body the gateway will buffer for forwarding.
const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

/// One upstream service behind a path prefix.
#[derive(Clone)]
pub struct ProxyTarget {
    base_url: String,
    http: reqwest::Client,
}

impl ProxyTarget {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            base_url: base_url.into(),
            http: reqwest::Client::builder()
                .timeout(timeout)
                .build()
                .expect("Failed to build proxy HTTP client"),
        }
    }
}

/// Router that forwards every request under its mount point to `base_url`.
pub fn router(base_url: impl Into<String>, timeout: Duration) -> Router {
    Router::new()
        .fallback(forward)
        .with_state(ProxyTarget::new(base_url, timeout))
}

/// Forward one request upstream and relay the response verbatim.
///
/// The upstream response is relayed whatever its status; only a failure
/// to reach the upstream at all (refused, timed out, protocol error)
/// becomes a gateway-issued 502.
async fn forward(
    State(target): State<ProxyTarget>,
    OriginalUri(uri): OriginalUri,
    request: Request,
) -> Response {
    let method = request.method().clone();
    let headers = request.headers().clone();

    let body = match to_bytes(request.into_body(), MAX_BODY_BYTES).await {
        Ok(bytes) => bytes,
        Err(_) => {
            return (
                StatusCode::PAYLOAD_TOO_LARGE,
                Json(json!({ "message": "Request body too large" })),
            )
                .into_response();
        }
    };

    // Nested routers see a stripped path, so the upstream URL is rebuilt
    // from the original URI to keep the /api/... prefix intact.
    let path_and_query = uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or(uri.path());
    let url = format!("{}{}", target.base_url, path_and_query);

    let upstream = target
        .http
        .request(method, &url)
        .headers(request_headers(&headers))
        .body(body)
        .send()
        .await;

    let upstream = match upstream {
        Ok(response) => response,
        Err(e) => {
            tracing::warn!(url = %url, error = %e, "Upstream request failed");
            return (
                StatusCode::BAD_GATEWAY,
                Json(json!({ "message": "Bad gateway" })),
            )
                .into_response();
        }
    };

    let status = upstream.status();
    let headers = response_headers(upstream.headers());
    let body = match upstream.bytes().await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!(url = %url, error = %e, "Failed to read upstream body");
            return (
                StatusCode::BAD_GATEWAY,
                Json(json!({ "message": "Bad gateway" })),
            )
                .into_response();
        }
    };

    (status, headers, Body::from(body)).into_response()
}

/// Request headers to forward upstream.
///
/// Host belongs to the gateway's own connection and content-length is
/// recomputed for the buffered body.
fn request_headers(headers: &HeaderMap) -> HeaderMap {
    let mut forwarded = HeaderMap::new();
    for (name, value) in headers {
        if name == header::HOST || name == header::CONTENT_LENGTH {
            continue;
        }
        forwarded.append(name, value.clone());
    }
    forwarded
}

/// Response headers to relay downstream.
///
/// Hop-by-hop headers describe the gateway-to-upstream connection and
/// must not leak into the client response; the framing headers are
/// regenerated for the buffered body.
fn response_headers(headers: &HeaderMap) -> HeaderMap {
    let mut relayed = HeaderMap::new();
    for (name, value) in headers {
        if name == header::CONNECTION
            || name == header::TRANSFER_ENCODING
            || name == header::CONTENT_LENGTH
        {
            continue;
        }
        relayed.append(name, value.clone());
    }
    relayed
}
