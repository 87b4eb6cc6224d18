/// User profile API routes
use crate::{
    executor::respond,
    middleware::CallerIdentity,
    services::{db_err, resolve_owner},
    state::AppState,
};
use axum::{extract::State, response::Response, Json};
use lyra_core::types::{ProfileUpdate, User};
use lyra_core::OpResult;

/// PUT /api/v1/users
///
/// Overwrite the acting user's mutable profile fields.
pub async fn update_profile(
    State(app_state): State<AppState>,
    caller: CallerIdentity,
    Json(update): Json<ProfileUpdate>,
) -> Response {
    respond(apply_update(&app_state, &caller, update).await)
}

async fn apply_update(
    app_state: &AppState,
    caller: &CallerIdentity,
    update: ProfileUpdate,
) -> OpResult<User> {
    let owner = resolve_owner(&app_state.pool, caller.identity()).await?;

    lyra_storage::users::update_email(&app_state.pool, owner.id, &update.email)
        .await
        .map_err(db_err)?;

    Ok(User {
        email: update.email,
        ..owner
    })
}
