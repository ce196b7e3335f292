//! Remote token verification client
//!
//! Resource services never validate tokens themselves. Every mutating
//! request is delegated to the identity service's verify endpoint through
//! [`VerifyClient`], and the outcome is normalized to either an
//! authenticated [`Principal`] or a 401. Network failure, timeout and an
//! actually-invalid token are deliberately indistinguishable to callers:
//! none of them is retryable within the request, and resource mutations
//! must not be silently duplicated by a retry loop.

use crate::error::{AppError, Result};
use crate::principal::Principal;
use crate::token::{bearer_token, AUTH_HEADER};
use axum::{extract::FromRequestParts, http::request::Parts};
use serde::Deserialize;
use std::time::Duration;

/// Successful body of the identity service's verify endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VerifyResponse {
    is_valid: bool,
    user: Principal,
}

/// Client for the identity service's verify endpoint.
#[derive(Clone)]
pub struct VerifyClient {
    base_url: String,
    http: reqwest::Client,
}

impl VerifyClient {
    /// Build a client for the identity service at `base_url`.
    ///
    /// The timeout bounds the whole verify call; expiry is treated as a
    /// verification failure, never as a retryable infrastructure error.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to build verify HTTP client");

        Self {
            base_url: base_url.into(),
            http,
        }
    }

    /// Resolve a bearer token to the principal it encodes.
    ///
    /// `None` fails immediately without a network call. `Some` issues a
    /// single synchronous call; any non-success response, connect error,
    /// timeout or undecodable body collapses to the uniform 401.
    pub async fn verify(&self, token: Option<&str>) -> Result<Principal> {
        let token = token.ok_or_else(AppError::missing_token)?;

        let response = self
            .http
            .get(format!("{}/api/auth/verify", self.base_url))
            .header(AUTH_HEADER, token)
            .send()
            .await
            .map_err(|e| {
                tracing::debug!("Verify call failed: {}", e);
                AppError::invalid_token()
            })?;

        if !response.status().is_success() {
            return Err(AppError::invalid_token());
        }

        let body: VerifyResponse = response.json().await.map_err(|e| {
            tracing::debug!("Verify response undecodable: {}", e);
            AppError::invalid_token()
        })?;

        if !body.is_valid {
            return Err(AppError::invalid_token());
        }

        Ok(body.user)
    }
}

/// State trait giving handlers access to the verification client.
///
/// Implemented by each resource service's `AppState` so the [`Principal`]
/// extractor (and router-building functions generic over the state) work
/// against both production and test states.
pub trait HasVerifier: Send + Sync {
    fn verifier(&self) -> &VerifyClient;
}

/// Axum extractor authenticating the request at handler entry.
///
/// Mutating handlers take `principal: Principal` as an argument; read
/// handlers simply omit it and stay public. The extractor consumes the
/// `x-auth-token` header once and delegates to the identity service.
impl<S> FromRequestParts<S> for Principal
where
    S: HasVerifier,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self> {
        let token = bearer_token(&parts.headers);
        state.verifier().verify(token.as_deref()).await
    }
}
