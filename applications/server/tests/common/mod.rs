//! Shared fixtures for server integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use lyra_core::Identity;
use lyra_server::error::{Result as ServerResult, ServerError};
use lyra_server::services::AssistantGateway;
use sqlx::SqlitePool;
use tempfile::TempDir;

/// Test context: real SQLite database file plus the reserved assistant user
pub struct TestCtx {
    pub pool: SqlitePool,
    pub assistant_user_id: i64,
    _temp_dir: TempDir,
}

impl TestCtx {
    pub async fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("test.db");
        let db_url = format!("sqlite://{}", db_path.display());

        let pool = lyra_storage::create_pool(&db_url)
            .await
            .expect("Failed to create pool");
        lyra_storage::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");

        let assistant_user_id = lyra_storage::users::ensure_reserved(&pool, "ChatGPT")
            .await
            .expect("Failed to ensure reserved user");

        Self {
            pool,
            assistant_user_id,
            _temp_dir: temp_dir,
        }
    }

    /// Create a user account and return their identity
    pub async fn signed_up(&self, username: &str) -> Identity {
        lyra_storage::users::create(&self.pool, username, &format!("{username}@example.com"))
            .await
            .expect("Failed to create user");
        Identity::named(username)
    }
}

/// Assistant stub that always answers with a fixed raw reply
pub struct StubAssistant {
    pub reply: String,
}

impl StubAssistant {
    pub fn replying(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
        }
    }
}

#[async_trait]
impl AssistantGateway for StubAssistant {
    async fn ask(&self, _prompt: &str) -> ServerResult<String> {
        Ok(self.reply.clone())
    }
}

/// Assistant stub whose transport always fails
pub struct FailingAssistant;

#[async_trait]
impl AssistantGateway for FailingAssistant {
    async fn ask(&self, _prompt: &str) -> ServerResult<String> {
        Err(ServerError::Internal("connection refused".to_string()))
    }
}
