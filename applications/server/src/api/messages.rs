/// Messages API routes
use crate::{
    executor::respond, middleware::CallerIdentity, services::MessageService, state::AppState,
};
use axum::{
    extract::{Path, State},
    response::Response,
    Json,
};
use lyra_core::types::MessageInput;
use lyra_core::CrudService;

fn service(app_state: &AppState) -> MessageService {
    MessageService::new(
        app_state.pool.clone(),
        app_state.assistant.clone(),
        app_state.assistant_user_id,
    )
}

/// POST /api/v1/messages
///
/// One full conversation turn; the response body is the assistant's message.
pub async fn create_message(
    State(app_state): State<AppState>,
    caller: CallerIdentity,
    Json(input): Json<MessageInput>,
) -> Response {
    respond(service(&app_state).create(caller.identity(), input).await)
}

/// PUT /api/v1/messages
pub async fn update_message(
    State(app_state): State<AppState>,
    caller: CallerIdentity,
    Json(input): Json<MessageInput>,
) -> Response {
    respond(service(&app_state).update(caller.identity(), input).await)
}

/// DELETE /api/v1/messages/:id
pub async fn delete_message(
    State(app_state): State<AppState>,
    caller: CallerIdentity,
    Path(id): Path<i64>,
) -> Response {
    let input = MessageInput {
        id: Some(id),
        ..MessageInput::default()
    };
    respond(service(&app_state).delete(caller.identity(), input).await)
}
