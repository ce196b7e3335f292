//! Server initialization and routing

use crate::api;
use crate::config::Config;
use crate::repository::{MemoryProfileRepository, ProfileRepository};
use anyhow::Result;
use axum::{
    routing::{get, post},
    Router,
};
use quill_common::{HasVerifier, VerifyClient};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub verifier: VerifyClient,
    pub profiles: Arc<dyn ProfileRepository>,
}

impl HasVerifier for AppState {
    fn verifier(&self) -> &VerifyClient {
        &self.verifier
    }
}

/// Build the HTTP router
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(api::health))
        .route("/api/profile", post(api::upsert).delete(api::delete))
        .route("/api/profile/{owner_id}", get(api::get))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Run the server
pub async fn run(config: Config) -> Result<()> {
    let state = AppState {
        verifier: VerifyClient::new(config.auth_base_url.clone(), config.request_timeout),
        profiles: Arc::new(MemoryProfileRepository::new()),
    };

    let app = build_router(state);
    let addr = config.addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Profile service started on {}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
