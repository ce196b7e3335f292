//! Quill API Gateway
//!
//! Transparent path-prefix dispatcher in front of the resource services,
//! plus an aggregated health endpoint. The gateway never authenticates or
//! inspects requests; authorization is strictly each resource service's
//! responsibility.

pub mod config;
pub mod health;
pub mod proxy;
pub mod server;

pub use config::Config;
