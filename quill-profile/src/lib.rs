//! Quill Profile Service
//!
//! One profile per user, keyed by the owner's id. The upsert operation
//! creates the profile on first write, so there is no separate create
//! path and no ownership guard beyond keying by the verified principal.

pub mod api;
pub mod config;
pub mod domain;
pub mod repository;
pub mod server;

pub use config::Config;
