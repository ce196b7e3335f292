//! Identity API handlers

use crate::crypto;
use crate::domain::{LoginInput, RegisterInput, User};
use crate::server::AppState;
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use quill_common::token::bearer_token;
use quill_common::{AppError, Result};
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    Json(json!({ "status": "Identity service is running" }))
}

/// Register a new user
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterInput>,
) -> Result<impl IntoResponse> {
    input
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let email_taken = state.users.find_by_email(&input.email).await?.is_some();
    let username_taken = state
        .users
        .find_by_username(&input.username)
        .await?
        .is_some();
    if email_taken || username_taken {
        return Err(AppError::BadRequest("User already exists".to_string()));
    }

    let user = User {
        id: Uuid::new_v4().to_string(),
        username: input.username,
        email: input.email,
        password_hash: crypto::hash_password(&input.password)?,
        created_at: Utc::now(),
    };
    state.users.insert(user).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "User registered successfully" })),
    ))
}

/// Log in and mint a bearer token
///
/// Unknown email and wrong password produce the same response so the
/// endpoint cannot be used to enumerate accounts.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginInput>,
) -> Result<impl IntoResponse> {
    input
        .validate()
        .map_err(|_| invalid_credentials())?;

    let user = state
        .users
        .find_by_email(&input.email)
        .await?
        .ok_or_else(invalid_credentials)?;

    if !crypto::verify_password(&input.password, &user.password_hash) {
        return Err(invalid_credentials());
    }

    let token = state
        .jwt
        .create_token(&user.id, &user.username, &user.email)?;

    Ok(Json(json!({ "token": token })))
}

fn invalid_credentials() -> AppError {
    AppError::BadRequest("Invalid email or password".to_string())
}

/// Verify a bearer token and return the principal it encodes
///
/// Stateless: the principal comes straight from the claims and the user
/// store is never consulted. Resource services call this on every
/// mutating request.
pub async fn verify(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse> {
    let token = bearer_token(&headers).ok_or_else(AppError::missing_token)?;
    let claims = state.jwt.verify_token(&token)?;

    Ok(Json(json!({
        "isValid": true,
        "user": claims.into_principal(),
    })))
}
