/// Songs API routes
use crate::{executor::respond, middleware::CallerIdentity, services::SongService, state::AppState};
use axum::{
    extract::{Path, Query, State},
    response::Response,
    Json,
};
use lyra_core::types::SongInput;
use lyra_core::CrudService;

/// GET /api/v1/songs
///
/// Optional `title` query narrows the result (case-insensitive match).
pub async fn list_songs(
    State(app_state): State<AppState>,
    caller: CallerIdentity,
    Query(filter): Query<SongInput>,
) -> Response {
    let service = SongService::new(app_state.pool.clone());
    let filter = (filter.id.is_some() || filter.title.is_some()).then_some(filter);
    respond(service.get_many(caller.identity(), filter).await)
}

/// GET /api/v1/songs/:id
pub async fn get_song(
    State(app_state): State<AppState>,
    caller: CallerIdentity,
    Path(id): Path<i64>,
) -> Response {
    let service = SongService::new(app_state.pool.clone());
    respond(service.get_one(caller.identity(), SongInput::by_id(id)).await)
}

/// POST /api/v1/songs
pub async fn create_song(
    State(app_state): State<AppState>,
    caller: CallerIdentity,
    Json(input): Json<SongInput>,
) -> Response {
    let service = SongService::new(app_state.pool.clone());
    respond(service.create(caller.identity(), input).await)
}

/// PUT /api/v1/songs
pub async fn update_song(
    State(app_state): State<AppState>,
    caller: CallerIdentity,
    Json(input): Json<SongInput>,
) -> Response {
    let service = SongService::new(app_state.pool.clone());
    respond(service.update(caller.identity(), input).await)
}

/// DELETE /api/v1/songs/:id
pub async fn delete_song(
    State(app_state): State<AppState>,
    caller: CallerIdentity,
    Path(id): Path<i64>,
) -> Response {
    let service = SongService::new(app_state.pool.clone());
    respond(service.delete(caller.identity(), SongInput::by_id(id)).await)
}
