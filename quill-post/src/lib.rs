//! Quill Post Service
//!
//! Post CRUD with delegated token verification and single-owner
//! enforcement on mutations. Deleting a post triggers a best-effort
//! cascade to the comment service.

pub mod api;
pub mod cascade;
pub mod config;
pub mod domain;
pub mod repository;
pub mod server;

pub use config::Config;
