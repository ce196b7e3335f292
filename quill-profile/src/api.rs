//! Profile API handlers
//!
//! Reads are public. The upsert writes only the authenticated principal's
//! own row, so the ownership check is implicit in the key.

use crate::domain::{Profile, UpsertProfileInput};
use crate::server::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use quill_common::{AppError, Principal, Result};
use serde_json::json;

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    Json(json!({ "status": "Profile service is running" }))
}

/// Get a profile by owner id
pub async fn get(
    State(state): State<AppState>,
    Path(owner_id): Path<String>,
) -> Result<impl IntoResponse> {
    let profile = state
        .profiles
        .find_by_owner(&owner_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Profile not found".to_string()))?;
    Ok(Json(profile))
}

/// Create or update the authenticated principal's profile
pub async fn upsert(
    State(state): State<AppState>,
    principal: Principal,
    Json(input): Json<UpsertProfileInput>,
) -> Result<impl IntoResponse> {
    let profile = match state.profiles.find_by_owner(&principal.id).await? {
        Some(mut existing) => {
            existing.apply(input);
            existing
        }
        None => Profile::create(input, &principal),
    };

    state.profiles.save(profile.clone()).await?;
    Ok(Json(profile))
}

/// Delete the authenticated principal's profile
pub async fn delete(
    State(state): State<AppState>,
    principal: Principal,
) -> Result<impl IntoResponse> {
    let removed = state.profiles.remove_by_owner(&principal.id).await?;
    if !removed {
        return Err(AppError::NotFound("Profile not found".to_string()));
    }
    Ok(Json(json!({ "message": "Profile deleted successfully" })))
}
