//! Post API handlers
//!
//! Reads are public. Mutations run the gate sequence
//! token -> existence -> ownership -> store; NotFound takes precedence
//! over Forbidden, since ownership is meaningless for a missing post.

use crate::domain::{CreatePostInput, Post, UpdatePostInput};
use crate::server::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use quill_common::policy::ensure_owner;
use quill_common::{AppError, Principal, Result};
use serde_json::json;

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    Json(json!({ "status": "Post service is running" }))
}

/// List all posts, newest first
pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let posts = state.posts.list().await?;
    Ok(Json(posts))
}

/// Get a single post
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let post = state
        .posts
        .find(&id)
        .await?
        .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;
    Ok(Json(post))
}

/// Create a post owned by the authenticated principal
pub async fn create(
    State(state): State<AppState>,
    principal: Principal,
    Json(input): Json<CreatePostInput>,
) -> Result<impl IntoResponse> {
    let post = Post::create(input, &principal);
    state.posts.save(post.clone()).await?;
    Ok((StatusCode::CREATED, Json(post)))
}

/// Update a post (owner only, presence-based partial update)
pub async fn update(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<String>,
    Json(input): Json<UpdatePostInput>,
) -> Result<impl IntoResponse> {
    let mut post = state
        .posts
        .find(&id)
        .await?
        .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

    ensure_owner(&post.owner_id, &principal, "update this post")?;

    post.apply(input);
    state.posts.save(post.clone()).await?;
    Ok(Json(post))
}

/// Delete a post (owner only), then cascade comments best-effort
pub async fn delete(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let post = state
        .posts
        .find(&id)
        .await?
        .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

    ensure_owner(&post.owner_id, &principal, "delete this post")?;

    state.posts.remove(&id).await?;

    // Best effort: the post is already gone, the response is already 200.
    state.cascade.notify_post_deleted(&id).await;

    Ok(Json(json!({ "message": "Post deleted successfully" })))
}
