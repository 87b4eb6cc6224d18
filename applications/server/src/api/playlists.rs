/// Playlists API routes
use crate::{
    executor::respond, middleware::CallerIdentity, services::PlaylistService, state::AppState,
};
use axum::{
    extract::{Path, Query, State},
    response::Response,
    Json,
};
use lyra_core::types::PlaylistInput;
use lyra_core::CrudService;

#[derive(Debug, serde::Deserialize)]
pub struct PlaylistQuery {
    #[serde(default)]
    pub name: Option<String>,
}

/// GET /api/v1/playlists
pub async fn list_playlists(
    State(app_state): State<AppState>,
    caller: CallerIdentity,
    Query(query): Query<PlaylistQuery>,
) -> Response {
    let service = PlaylistService::new(app_state.pool.clone());
    let filter = query.name.map(PlaylistInput::by_name);
    respond(service.get_many(caller.identity(), filter).await)
}

/// GET /api/v1/playlists/:id
pub async fn get_playlist(
    State(app_state): State<AppState>,
    caller: CallerIdentity,
    Path(id): Path<i64>,
) -> Response {
    let service = PlaylistService::new(app_state.pool.clone());
    respond(
        service
            .get_one(caller.identity(), PlaylistInput::by_id(id))
            .await,
    )
}

/// GET /api/v1/playlists/:id/songs
///
/// Ordered membership with denormalized song fields.
pub async fn get_playlist_songs(
    State(app_state): State<AppState>,
    caller: CallerIdentity,
    Path(id): Path<i64>,
) -> Response {
    let service = PlaylistService::new(app_state.pool.clone());
    respond(service.songs_of(caller.identity(), id).await)
}

/// POST /api/v1/playlists
pub async fn create_playlist(
    State(app_state): State<AppState>,
    caller: CallerIdentity,
    Json(input): Json<PlaylistInput>,
) -> Response {
    let service = PlaylistService::new(app_state.pool.clone());
    respond(service.create(caller.identity(), input).await)
}

/// PUT /api/v1/playlists
///
/// When the body carries `songs`, the submitted sequence replaces the
/// playlist's entire membership.
pub async fn update_playlist(
    State(app_state): State<AppState>,
    caller: CallerIdentity,
    Json(input): Json<PlaylistInput>,
) -> Response {
    let service = PlaylistService::new(app_state.pool.clone());
    respond(service.update(caller.identity(), input).await)
}

/// DELETE /api/v1/playlists/:id
pub async fn delete_playlist(
    State(app_state): State<AppState>,
    caller: CallerIdentity,
    Path(id): Path<i64>,
) -> Response {
    let service = PlaylistService::new(app_state.pool.clone());
    respond(
        service
            .delete(caller.identity(), PlaylistInput::by_id(id))
            .await,
    )
}
