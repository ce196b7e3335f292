//! Quill Comment Service
//!
//! Comment CRUD keyed to a post, with delegated token verification and a
//! synchronous post-existence check before creation. Also exposes the
//! delete-by-post endpoint the post service cascades into.

pub mod api;
pub mod config;
pub mod domain;
pub mod post_check;
pub mod repository;
pub mod server;

pub use config::Config;
