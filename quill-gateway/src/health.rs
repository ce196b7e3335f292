//! Aggregated health checks
//!
//! Probes every resource service concurrently and reduces the settled
//! results into one report. This path is independent of the proxy and
//! never touches resource handlers.

use crate::config::Config;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use futures::future::join_all;
use quill_common::{AppError, Result};
use reqwest::Url;
use serde::Serialize;
use serde_json::json;
use std::collections::BTreeMap;

/// Health of a single probed service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceStatus {
    Up,
    Down,
}

/// Fans a liveness probe out to every configured service.
#[derive(Clone)]
pub struct HealthAggregator {
    http: reqwest::Client,
    targets: Vec<(&'static str, String)>,
}

impl HealthAggregator {
    pub fn new(config: &Config) -> Self {
        let http = reqwest::Client::builder()
            .timeout(config.probe_timeout)
            .build()
            .expect("Failed to build probe HTTP client");

        Self {
            http,
            targets: vec![
                ("auth", config.auth_base_url.clone()),
                ("post", config.post_base_url.clone()),
                ("comment", config.comment_base_url.clone()),
                ("profile", config.profile_base_url.clone()),
            ],
        }
    }

    /// Probe every service and wait for all probes to settle.
    ///
    /// Settle-all, never fail-fast: one down service must not abort the
    /// reporting of the others. A service is up iff its probe returned a
    /// success status within the bound. Failing to even assemble the
    /// fan-out is an internal error, distinct from any service being
    /// down.
    pub async fn probe_all(&self) -> Result<BTreeMap<&'static str, ServiceStatus>> {
        let urls = self
            .targets
            .iter()
            .map(|(name, base)| {
                Url::parse(&format!("{base}/health"))
                    .map(|url| (*name, url))
                    .map_err(|e| {
                        AppError::Internal(anyhow::anyhow!("Invalid probe URL for {name}: {e}"))
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        let probes = urls.into_iter().map(|(name, url)| {
            let http = self.http.clone();
            async move {
                let up = match http.get(url).send().await {
                    Ok(response) => response.status().is_success(),
                    Err(e) => {
                        tracing::warn!(service = name, error = %e, "Health probe failed");
                        false
                    }
                };
                (name, if up { ServiceStatus::Up } else { ServiceStatus::Down })
            }
        });

        Ok(join_all(probes).await.into_iter().collect())
    }
}

/// Gateway liveness only; no fan-out.
pub async fn gateway_health() -> impl IntoResponse {
    Json(json!({ "status": "API Gateway is running" }))
}

/// Aggregated health of every resource service.
///
/// 200 when all services are up, 207 when any is down, 500 only when the
/// fan-out itself could not be issued.
pub async fn aggregate(State(aggregator): State<HealthAggregator>) -> Result<impl IntoResponse> {
    let services = aggregator.probe_all().await?;
    let all_up = services.values().all(|status| *status == ServiceStatus::Up);

    let status = if all_up {
        StatusCode::OK
    } else {
        StatusCode::MULTI_STATUS
    };

    Ok((
        status,
        Json(json!({
            "gateway": "up",
            "services": services,
        })),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_status_serializes_lowercase() {
        assert_eq!(serde_json::to_value(ServiceStatus::Up).unwrap(), "up");
        assert_eq!(serde_json::to_value(ServiceStatus::Down).unwrap(), "down");
    }
}
