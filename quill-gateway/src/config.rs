//! Configuration for the gateway

use anyhow::{Context, Result};
use std::env;
use std::time::Duration;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server host
    pub host: String,
    /// HTTP server port
    pub port: u16,
    /// Base URL of the identity service
    pub auth_base_url: String,
    /// Base URL of the post service
    pub post_base_url: String,
    /// Base URL of the comment service
    pub comment_base_url: String,
    /// Base URL of the profile service
    pub profile_base_url: String,
    /// Bound on proxied upstream calls
    pub request_timeout: Duration,
    /// Bound on each health probe
    pub probe_timeout: Duration,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .context("Invalid PORT")?,
            auth_base_url: env::var("AUTH_SERVICE_URL").context("AUTH_SERVICE_URL is required")?,
            post_base_url: env::var("POST_SERVICE_URL").context("POST_SERVICE_URL is required")?,
            comment_base_url: env::var("COMMENT_SERVICE_URL")
                .context("COMMENT_SERVICE_URL is required")?,
            profile_base_url: env::var("PROFILE_SERVICE_URL")
                .context("PROFILE_SERVICE_URL is required")?,
            request_timeout: Duration::from_secs(
                env::var("REQUEST_TIMEOUT_SECS")
                    .unwrap_or_else(|_| "30".to_string())
                    .parse()
                    .unwrap_or(30),
            ),
            probe_timeout: Duration::from_secs(
                env::var("PROBE_TIMEOUT_SECS")
                    .unwrap_or_else(|_| "5".to_string())
                    .parse()
                    .unwrap_or(5),
            ),
        })
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
