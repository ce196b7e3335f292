//! Comment API handlers
//!
//! Mutations run token -> (post existence on create | comment existence)
//! -> ownership -> store. The delete-by-post route is the cascade target
//! for the post service and is deliberately unauthenticated: it is an
//! internal cleanup surface, idempotent, and deleting zero comments is
//! success.

use crate::domain::{Comment, CreateCommentInput, UpdateCommentInput};
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
    Json(json!({ "status": "Comment service is running" }))
}

/// List comments on a post, newest first
pub async fn list_by_post(
    State(state): State<AppState>,
    Path(post_id): Path<String>,
) -> Result<impl IntoResponse> {
    let comments = state.comments.list_by_post(&post_id).await?;
    Ok(Json(comments))
}

/// Create a comment on an existing post
pub async fn create(
    State(state): State<AppState>,
    principal: Principal,
    Json(input): Json<CreateCommentInput>,
) -> Result<impl IntoResponse> {
    state.posts.ensure_exists(&input.post_id).await?;

    let comment = Comment::create(input, &principal);
    state.comments.save(comment.clone()).await?;
    Ok((StatusCode::CREATED, Json(comment)))
}

/// Update a comment (owner only)
pub async fn update(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<String>,
    Json(input): Json<UpdateCommentInput>,
) -> Result<impl IntoResponse> {
    let mut comment = state
        .comments
        .find(&id)
        .await?
        .ok_or_else(|| AppError::NotFound("Comment not found".to_string()))?;

    ensure_owner(&comment.owner_id, &principal, "update this comment")?;

    comment.apply(input);
    state.comments.save(comment.clone()).await?;
    Ok(Json(comment))
}

/// Delete a comment (owner only)
pub async fn delete(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let comment = state
        .comments
        .find(&id)
        .await?
        .ok_or_else(|| AppError::NotFound("Comment not found".to_string()))?;

    ensure_owner(&comment.owner_id, &principal, "delete this comment")?;

    state.comments.remove(&id).await?;
    Ok(Json(json!({ "message": "Comment deleted successfully" })))
}

/// Delete every comment on a post (cascade target)
pub async fn delete_by_post(
    State(state): State<AppState>,
    Path(post_id): Path<String>,
) -> Result<impl IntoResponse> {
    let removed = state.comments.remove_by_post(&post_id).await?;
    tracing::debug!(post_id, removed, "Cascade delete completed");
    Ok(Json(json!({ "message": "Comments deleted successfully" })))
}
