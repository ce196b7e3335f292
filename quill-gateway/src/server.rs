//! Server initialization and routing
//!
//! All gateway routing is by path prefix only. Requests under a mapped
//! prefix go to exactly one upstream; anything else is answered by the
//! gateway's own 404 without touching any service.

use crate::config::Config;
use crate::health::{self, HealthAggregator};
use crate::proxy;
use anyhow::Result;
use axum::{http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde_json::json;
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

/// Build the HTTP router
pub fn build_router(config: &Config) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health::gateway_health))
        .route("/api/health", get(health::aggregate))
        .with_state(HealthAggregator::new(config))
        .nest(
            "/api/auth",
            proxy::router(config.auth_base_url.clone(), config.request_timeout),
        )
        .nest(
            "/api/posts",
            proxy::router(config.post_base_url.clone(), config.request_timeout),
        )
        .nest(
            "/api/comments",
            proxy::router(config.comment_base_url.clone(), config.request_timeout),
        )
        .nest(
            "/api/profile",
            proxy::router(config.profile_base_url.clone(), config.request_timeout),
        )
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Unmapped paths are answered by the gateway itself.
async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "message": "Route not found" })),
    )
}

/// Run the server
pub async fn run(config: Config) -> Result<()> {
    let app = build_router(&config);
    let addr = config.addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("API Gateway started on {}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
