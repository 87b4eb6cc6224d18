/// Authentication API routes
use crate::{
    error::{Result, ServerError},
    state::AppState,
};
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct SignUpRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct SignUpResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct SignInRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct SignInResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
}

#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub access_token: String,
    pub token_type: String,
}

/// POST /api/v1/auth/sign-up
pub async fn sign_up(
    State(app_state): State<AppState>,
    Json(req): Json<SignUpRequest>,
) -> Result<Json<SignUpResponse>> {
    if req.username.is_empty() || req.password.is_empty() {
        return Err(ServerError::BadRequest(
            "Username and password are required".to_string(),
        ));
    }

    if lyra_storage::users::find_by_username(&app_state.pool, &req.username)
        .await?
        .is_some()
    {
        return Err(ServerError::BadRequest("Username already taken".to_string()));
    }

    let user = lyra_storage::users::create(&app_state.pool, &req.username, &req.email).await?;

    let password_hash = app_state.auth_service.hash_password(&req.password)?;
    lyra_storage::users::set_password_hash(&app_state.pool, user.id, &password_hash).await?;

    Ok(Json(SignUpResponse {
        id: user.id,
        username: user.username,
        email: user.email,
    }))
}

/// POST /api/v1/auth/sign-in
pub async fn sign_in(
    State(app_state): State<AppState>,
    Json(req): Json<SignInRequest>,
) -> Result<Json<SignInResponse>> {
    let user = lyra_storage::users::find_by_username(&app_state.pool, &req.username)
        .await?
        .ok_or_else(|| ServerError::Auth("Invalid username or password".to_string()))?;

    // The reserved assistant account has no credentials and can never pass here
    let password_hash = lyra_storage::users::get_password_hash(&app_state.pool, user.id)
        .await?
        .ok_or_else(|| ServerError::Auth("Invalid username or password".to_string()))?;

    if !app_state
        .auth_service
        .verify_password(&req.password, &password_hash)?
    {
        return Err(ServerError::Auth("Invalid username or password".to_string()));
    }

    let access_token = app_state.auth_service.create_access_token(&user.username)?;
    let refresh_token = app_state.auth_service.create_refresh_token(&user.username)?;

    Ok(Json(SignInResponse {
        access_token,
        refresh_token,
        token_type: "Bearer".to_string(),
    }))
}

/// POST /api/v1/auth/refresh
pub async fn refresh(
    State(app_state): State<AppState>,
    Json(req): Json<RefreshRequest>,
) -> Result<Json<RefreshResponse>> {
    let username = app_state
        .auth_service
        .verify_refresh_token(&req.refresh_token)?;

    let access_token = app_state.auth_service.create_access_token(&username)?;

    Ok(Json(RefreshResponse {
        access_token,
        token_type: "Bearer".to_string(),
    }))
}
