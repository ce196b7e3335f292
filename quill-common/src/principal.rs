//! Authenticated identity resolved from a bearer token

use serde::{Deserialize, Serialize};

/// The identity a bearer token resolves to.
///
/// A `Principal` exists only as a derived, per-request value. Resource
/// services never persist it and re-verify the token on every mutating
/// request. It reflects token-issue-time identity: a user renamed after
/// login keeps their old username here until they log in again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub id: String,
    pub username: String,
    pub email: String,
}
