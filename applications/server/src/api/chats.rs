/// Chats API routes
use crate::{executor::respond, middleware::CallerIdentity, services::ChatService, state::AppState};
use axum::{
    extract::{Path, State},
    response::Response,
    Json,
};
use lyra_core::types::ChatInput;
use lyra_core::CrudService;

/// GET /api/v1/chats
pub async fn list_chats(State(app_state): State<AppState>, caller: CallerIdentity) -> Response {
    let service = ChatService::new(app_state.pool.clone(), app_state.assistant_user_id);
    respond(service.get_many(caller.identity(), None).await)
}

/// GET /api/v1/chats/:id
pub async fn get_chat(
    State(app_state): State<AppState>,
    caller: CallerIdentity,
    Path(id): Path<i64>,
) -> Response {
    let service = ChatService::new(app_state.pool.clone(), app_state.assistant_user_id);
    respond(service.get_one(caller.identity(), ChatInput::by_id(id)).await)
}

/// POST /api/v1/chats
pub async fn create_chat(
    State(app_state): State<AppState>,
    caller: CallerIdentity,
    Json(input): Json<ChatInput>,
) -> Response {
    let service = ChatService::new(app_state.pool.clone(), app_state.assistant_user_id);
    respond(service.create(caller.identity(), input).await)
}

/// PUT /api/v1/chats
pub async fn update_chat(
    State(app_state): State<AppState>,
    caller: CallerIdentity,
    Json(input): Json<ChatInput>,
) -> Response {
    let service = ChatService::new(app_state.pool.clone(), app_state.assistant_user_id);
    respond(service.update(caller.identity(), input).await)
}

/// DELETE /api/v1/chats/:id
pub async fn delete_chat(
    State(app_state): State<AppState>,
    caller: CallerIdentity,
    Path(id): Path<i64>,
) -> Response {
    let service = ChatService::new(app_state.pool.clone(), app_state.assistant_user_id);
    respond(service.delete(caller.identity(), ChatInput::by_id(id)).await)
}
