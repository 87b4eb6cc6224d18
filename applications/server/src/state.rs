/// Shared application state
use crate::services::{assistant::AssistantGateway, AuthService, MediaStore};
use sqlx::SqlitePool;
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub auth_service: Arc<AuthService>,
    pub media_store: Arc<MediaStore>,
    pub assistant: Arc<dyn AssistantGateway>,
    /// Id of the reserved user that authors assistant messages, resolved once
    /// at startup
    pub assistant_user_id: i64,
}

impl AppState {
    pub fn new(
        pool: SqlitePool,
        auth_service: Arc<AuthService>,
        media_store: Arc<MediaStore>,
        assistant: Arc<dyn AssistantGateway>,
        assistant_user_id: i64,
    ) -> Self {
        Self {
            pool,
            auth_service,
            media_store,
            assistant,
            assistant_user_id,
        }
    }
}
