//! Test helpers and fixtures for storage integration tests
//!
//! These helpers create test databases using REAL SQLite files (NOT in-memory)
//! to match production behavior and properly test migrations, constraints, and
//! cascades.

#![allow(dead_code)]

use lyra_core::types::User;
use sqlx::SqlitePool;
use tempfile::TempDir;

/// Test database wrapper that cleans up on drop
pub struct TestDb {
    pub pool: SqlitePool,
    _temp_dir: TempDir,
}

impl TestDb {
    /// Create a new test database with migrations applied
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

        Self {
            pool,
            _temp_dir: temp_dir,
        }
    }

    /// Get the pool reference
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

/// Test fixture: create a user account
pub async fn create_test_user(pool: &SqlitePool, username: &str) -> User {
    lyra_storage::users::create(pool, username, &format!("{username}@example.com"))
        .await
        .expect("Failed to create test user")
}

/// Test fixture: create a song owned by `owner_id`
pub async fn create_test_song(pool: &SqlitePool, owner_id: i64, title: &str) -> i64 {
    let song = lyra_storage::songs::create(pool, owner_id, title, "Test Artist", "")
        .await
        .expect("Failed to create test song");
    song.id
}

/// Test fixture: create a playlist owned by `owner_id`
pub async fn create_test_playlist(pool: &SqlitePool, owner_id: i64, name: &str) -> i64 {
    let playlist = lyra_storage::playlists::create(pool, owner_id, name, false)
        .await
        .expect("Failed to create test playlist");
    playlist.id
}

/// Test fixture: create a chat with its seed message
pub async fn create_test_chat(
    pool: &SqlitePool,
    creator_id: i64,
    assistant_user_id: i64,
    name: &str,
) -> i64 {
    let chat = lyra_storage::chats::create(pool, creator_id, name, assistant_user_id)
        .await
        .expect("Failed to create test chat");
    chat.id
}
