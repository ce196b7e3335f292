//! Server initialization and routing

use crate::api;
use crate::config::Config;
use crate::jwt::JwtManager;
use crate::repository::{MemoryUserRepository, UserRepository};
use anyhow::Result;
use axum::{
    routing::{get, post},
    Router,
};
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
    pub jwt: JwtManager,
    pub users: Arc<dyn UserRepository>,
}

/// Build the HTTP router
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(api::health))
        .route("/api/auth/register", post(api::register))
        .route("/api/auth/login", post(api::login))
        .route("/api/auth/verify", get(api::verify))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Run the server
pub async fn run(config: Config) -> Result<()> {
    let state = AppState {
        jwt: JwtManager::new(&config.jwt),
        users: Arc::new(MemoryUserRepository::new()),
    };

    let app = build_router(state);
    let addr = config.addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Identity service started on {}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
