//! Server initialization and routing

use crate::api;
use crate::cascade::CascadeClient;
use crate::config::Config;
use crate::repository::{MemoryPostRepository, PostRepository};
use anyhow::Result;
use axum::{routing::get, Router};
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
    pub cascade: CascadeClient,
    pub posts: Arc<dyn PostRepository>,
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
        .route("/api/posts", get(api::list).post(api::create))
        .route(
            "/api/posts/{id}",
            get(api::get).put(api::update).delete(api::delete),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Run the server
pub async fn run(config: Config) -> Result<()> {
    let state = AppState {
        verifier: VerifyClient::new(config.auth_base_url.clone(), config.request_timeout),
        cascade: CascadeClient::new(config.comment_base_url.clone(), config.request_timeout),
        posts: Arc::new(MemoryPostRepository::new()),
    };

    let app = build_router(state);
    let addr = config.addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Post service started on {}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
