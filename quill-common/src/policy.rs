//! Ownership policy
//!
//! Mutating operations on a resource are gated on the recorded owner
//! matching the authenticated principal. Reads are public and never pass
//! through this module. The check is a plain equality comparison; there
//! are no roles or hierarchies.

use crate::error::{AppError, Result};
use crate::principal::Principal;

/// Outcome of an ownership decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Allow,
    Deny,
}

/// Pure ownership decision: does this principal own the resource?
pub fn authorize(owner_id: &str, principal_id: &str) -> Access {
    if owner_id == principal_id {
        Access::Allow
    } else {
        Access::Deny
    }
}

/// Gate a mutating operation on ownership.
///
/// `action` names the attempted operation for the 403 message, e.g.
/// `"update this post"`. Callers must check resource existence first:
/// NotFound takes precedence over Forbidden.
pub fn ensure_owner(owner_id: &str, principal: &Principal, action: &str) -> Result<()> {
    match authorize(owner_id, &principal.id) {
        Access::Allow => Ok(()),
        Access::Deny => Err(AppError::Forbidden(format!(
            "User not authorized to {action}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn principal(id: &str) -> Principal {
        Principal {
            id: id.to_string(),
            username: "ada".to_string(),
            email: "ada@example.com".to_string(),
        }
    }

    #[test]
    fn test_owner_allowed() {
        assert_eq!(authorize("user-1", "user-1"), Access::Allow);
        assert!(ensure_owner("user-1", &principal("user-1"), "update this post").is_ok());
    }

    #[test]
    fn test_non_owner_denied() {
        assert_eq!(authorize("user-1", "user-2"), Access::Deny);
        let err = ensure_owner("user-1", &principal("user-2"), "delete this post").unwrap_err();
        match err {
            AppError::Forbidden(msg) => {
                assert_eq!(msg, "User not authorized to delete this post")
            }
            other => panic!("expected Forbidden, got {other:?}"),
        }
    }

    #[test]
    fn test_comparison_is_exact() {
        // No normalization: ids are opaque strings.
        assert_eq!(authorize("User-1", "user-1"), Access::Deny);
        assert_eq!(authorize("user-1 ", "user-1"), Access::Deny);
    }
}
