//! Chat queries, scoped to the creating user

use crate::error::Result;
use crate::now_utc;
use lyra_core::types::{Chat, Message};
use sqlx::{Row, SqlitePool};

/// Seed text of the assistant message every new chat starts with
pub const SEED_TEXT: &str = "How can I help you ?";

fn map_chat(row: &sqlx::sqlite::SqliteRow) -> Chat {
    Chat {
        id: row.get("id"),
        name: row.get("name"),
        creator_id: row.get("creator_id"),
        messages: None,
    }
}

/// Get a chat by id, owner-scoped
pub async fn get_by_id(pool: &SqlitePool, id: i64, creator_id: i64) -> Result<Option<Chat>> {
    let row = sqlx::query(
        "SELECT id, name, creator_id FROM chats WHERE id = ? AND creator_id = ?",
    )
    .bind(id)
    .bind(creator_id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|r| map_chat(&r)))
}

/// Get a chat with its messages in creation order, owner-scoped
pub async fn get_with_messages(
    pool: &SqlitePool,
    id: i64,
    creator_id: i64,
) -> Result<Option<Chat>> {
    let Some(mut chat) = get_by_id(pool, id, creator_id).await? else {
        return Ok(None);
    };

    chat.messages = Some(crate::messages::list_for_chat(pool, id).await?);

    Ok(Some(chat))
}

/// List the user's chats, each with its messages
pub async fn list(pool: &SqlitePool, creator_id: i64) -> Result<Vec<Chat>> {
    let rows = sqlx::query("SELECT id, name, creator_id FROM chats WHERE creator_id = ? ORDER BY id")
        .bind(creator_id)
        .fetch_all(pool)
        .await?;

    let mut chats: Vec<Chat> = rows.iter().map(map_chat).collect();
    for chat in &mut chats {
        chat.messages = Some(crate::messages::list_for_chat(pool, chat.id).await?);
    }

    Ok(chats)
}

/// Create a chat seeded with exactly one assistant-authored welcome message.
///
/// Chat row and seed message commit atomically; no chat ever exists without
/// its seed.
pub async fn create(
    pool: &SqlitePool,
    creator_id: i64,
    name: &str,
    assistant_user_id: i64,
) -> Result<Chat> {
    let mut tx = pool.begin().await?;

    let result = sqlx::query("INSERT INTO chats (name, creator_id) VALUES (?, ?)")
        .bind(name)
        .bind(creator_id)
        .execute(&mut *tx)
        .await?;
    let chat_id = result.last_insert_rowid();

    let created_at = now_utc();
    let seed = sqlx::query(
        "INSERT INTO messages (chat_id, user_id, text, created_at) VALUES (?, ?, ?, ?)",
    )
    .bind(chat_id)
    .bind(assistant_user_id)
    .bind(SEED_TEXT)
    .bind(&created_at)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(Chat {
        id: chat_id,
        name: name.to_string(),
        creator_id,
        messages: Some(vec![Message {
            id: seed.last_insert_rowid(),
            chat_id,
            user_id: assistant_user_id,
            text: SEED_TEXT.to_string(),
            created_at,
        }]),
    })
}

/// Overwrite a chat's name, owner-scoped
pub async fn update(pool: &SqlitePool, id: i64, creator_id: i64, name: &str) -> Result<bool> {
    let result = sqlx::query("UPDATE chats SET name = ? WHERE id = ? AND creator_id = ?")
        .bind(name)
        .bind(id)
        .bind(creator_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Hard-delete a chat, owner-scoped; messages cascade
pub async fn delete(pool: &SqlitePool, id: i64, creator_id: i64) -> Result<bool> {
    let result = sqlx::query("DELETE FROM chats WHERE id = ? AND creator_id = ?")
        .bind(id)
        .bind(creator_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
