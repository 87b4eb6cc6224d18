//! User accounts and credential queries

use crate::error::Result;
use crate::now_utc;
use lyra_core::types::User;
use sqlx::{Row, SqlitePool};

fn map_user(row: &sqlx::sqlite::SqliteRow) -> User {
    User {
        id: row.get("id"),
        username: row.get("username"),
        email: row.get("email"),
        created_at: row.get("created_at"),
    }
}

/// Look up a user by exact username
pub async fn find_by_username(pool: &SqlitePool, username: &str) -> Result<Option<User>> {
    let row = sqlx::query("SELECT id, username, email, created_at FROM users WHERE username = ?")
        .bind(username)
        .fetch_optional(pool)
        .await?;

    Ok(row.map(|r| map_user(&r)))
}

/// Look up a user by id
pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<User>> {
    let row = sqlx::query("SELECT id, username, email, created_at FROM users WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(row.map(|r| map_user(&r)))
}

/// Create a new user account
pub async fn create(pool: &SqlitePool, username: &str, email: &str) -> Result<User> {
    let created_at = now_utc();
    let result = sqlx::query("INSERT INTO users (username, email, created_at) VALUES (?, ?, ?)")
        .bind(username)
        .bind(email)
        .bind(&created_at)
        .execute(pool)
        .await?;

    Ok(User {
        id: result.last_insert_rowid(),
        username: username.to_string(),
        email: email.to_string(),
        created_at,
    })
}

/// Overwrite a user's mutable profile fields
pub async fn update_email(pool: &SqlitePool, user_id: i64, email: &str) -> Result<()> {
    sqlx::query("UPDATE users SET email = ? WHERE id = ?")
        .bind(email)
        .bind(user_id)
        .execute(pool)
        .await?;

    Ok(())
}

/// Ensure the reserved assistant user exists, returning its id.
///
/// Idempotent; called once at process start before serving traffic. The
/// reserved user carries no credentials and can never sign in.
pub async fn ensure_reserved(pool: &SqlitePool, username: &str) -> Result<i64> {
    if let Some(user) = find_by_username(pool, username).await? {
        return Ok(user.id);
    }

    let user = create(pool, username, "").await?;
    Ok(user.id)
}

/// Get all users
pub async fn get_all(pool: &SqlitePool) -> Result<Vec<User>> {
    let rows = sqlx::query("SELECT id, username, email, created_at FROM users ORDER BY username")
        .fetch_all(pool)
        .await?;

    Ok(rows.iter().map(map_user).collect())
}

/// Get a user's password hash for authentication
pub async fn get_password_hash(pool: &SqlitePool, user_id: i64) -> Result<Option<String>> {
    let row = sqlx::query("SELECT password_hash FROM user_credentials WHERE user_id = ?")
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

    Ok(row.map(|r| r.get("password_hash")))
}

/// Create or update user credentials
///
/// `password_hash` must already be hashed; plaintext never reaches this layer.
pub async fn set_password_hash(pool: &SqlitePool, user_id: i64, password_hash: &str) -> Result<()> {
    sqlx::query(
        "INSERT INTO user_credentials (user_id, password_hash, updated_at)
         VALUES (?, ?, ?)
         ON CONFLICT(user_id)
         DO UPDATE SET password_hash = excluded.password_hash, updated_at = excluded.updated_at",
    )
    .bind(user_id)
    .bind(password_hash)
    .bind(now_utc())
    .execute(pool)
    .await?;

    Ok(())
}
