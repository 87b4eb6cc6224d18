/// One-shot assistant API
use crate::{middleware::CallerIdentity, state::AppState};
use axum::{extract::State, Json};
use lyra_core::reply::AssistantReply;

/// POST /api/v1/assistant/ask
///
/// Structured one-shot ask without persistence: the raw reply is parsed
/// best-effort and the structured result returned as-is. Transport failures
/// degrade to the fallback reply, never an error.
pub async fn ask(
    State(app_state): State<AppState>,
    _caller: CallerIdentity,
    Json(prompt): Json<String>,
) -> Json<AssistantReply> {
    let raw = match app_state.assistant.ask(&prompt).await {
        Ok(raw) => raw,
        Err(e) => {
            tracing::warn!("Assistant request degraded to fallback: {}", e);
            String::new()
        }
    };

    Json(AssistantReply::parse(&raw))
}
