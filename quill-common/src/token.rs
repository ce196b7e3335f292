//! Bearer token header plumbing
//!
//! The token travels on the `x-auth-token` header as an opaque string.
//! Absence is represented as `None` and decided once at handler entry,
//! never re-checked downstream.

use axum::http::HeaderMap;

/// Request header carrying the bearer token.
pub const AUTH_HEADER: &str = "x-auth-token";

/// Extract the bearer token from the request headers, if present.
///
/// Header-name matching is case-insensitive per HTTP semantics. A header
/// that is present but not valid UTF-8 is treated as absent.
pub fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(AUTH_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.to_string())
}
