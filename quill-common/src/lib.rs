//! Shared building blocks for Quill services
//!
//! Every resource service delegates token verification to the identity
//! service through [`verify::VerifyClient`] and gates mutations with the
//! ownership policy in [`policy`]. The error taxonomy in [`error`] fixes
//! the HTTP status and message contract across the whole system.

pub mod error;
pub mod policy;
pub mod principal;
pub mod store;
pub mod token;
pub mod verify;

pub use error::{AppError, Result};
pub use principal::Principal;
pub use verify::{HasVerifier, VerifyClient};
