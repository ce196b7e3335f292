//! JWT token handling

use crate::config::JwtConfig;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use quill_common::{AppError, Principal, Result};
use serde::{Deserialize, Serialize};

/// Claims bound into every issued token.
///
/// The token carries the full principal, so verification never needs the
/// user store. Identity is frozen at issue time: a renamed user keeps the
/// old username here until they log in again.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User ID
    pub id: String,
    /// Username at issue time
    pub username: String,
    /// Email at issue time
    pub email: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    pub fn into_principal(self) -> Principal {
        Principal {
            id: self.id,
            username: self.username,
            email: self.email,
        }
    }
}

/// JWT token manager (HS256)
#[derive(Clone)]
pub struct JwtManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl_secs: i64,
}

impl JwtManager {
    pub fn new(config: &JwtConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            ttl_secs: config.ttl_secs,
        }
    }

    /// Create a Validation with a strict leeway (5 seconds) instead of the
    /// default 60, so tokens expire promptly while tolerating clock skew.
    fn strict_validation() -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 5;
        validation
    }

    /// Mint a token binding the user's identity at issue time.
    pub fn create_token(&self, id: &str, username: &str, email: &str) -> Result<String> {
        let now = Utc::now();
        let claims = Claims {
            id: id.to_string(),
            username: username.to_string(),
            email: email.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(self.ttl_secs)).timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to sign token: {}", e)))
    }

    /// Validate a token and return its claims.
    ///
    /// Every failure mode (bad signature, expiry, malformed token) is
    /// surfaced as the same uniform 401; no detail leaks to the caller.
    pub fn verify_token(&self, token: &str) -> Result<Claims> {
        decode::<Claims>(token, &self.decoding_key, &Self::strict_validation())
            .map(|data| data.claims)
            .map_err(|_| AppError::invalid_token())
    }
}
