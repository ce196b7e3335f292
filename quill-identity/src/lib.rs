//! Quill Identity Service
//!
//! Owns credential issuance (register/login) and the verify endpoint that
//! every resource service delegates token validation to. Verification is
//! stateless: the principal is decoded from the token's claims and never
//! re-fetched from the user store.

pub mod api;
pub mod config;
pub mod crypto;
pub mod domain;
pub mod jwt;
pub mod repository;
pub mod server;

pub use config::Config;
