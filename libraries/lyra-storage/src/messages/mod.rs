//! Message queries and the conversation turn recorder
//!
//! Messages authorize through two gates: the enclosing chat must belong to
//! the caller, and mutation additionally requires authorship.

use crate::error::Result;
use crate::now_utc;
use lyra_core::types::Message;
use sqlx::{Row, SqlitePool};

fn map_message(row: &sqlx::sqlite::SqliteRow) -> Message {
    Message {
        id: row.get("id"),
        chat_id: row.get("chat_id"),
        user_id: row.get("user_id"),
        text: row.get("text"),
        created_at: row.get("created_at"),
    }
}

/// All messages of a chat in creation order
pub async fn list_for_chat(pool: &SqlitePool, chat_id: i64) -> Result<Vec<Message>> {
    let rows = sqlx::query(
        "SELECT id, chat_id, user_id, text, created_at
         FROM messages WHERE chat_id = ? ORDER BY id",
    )
    .bind(chat_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().map(map_message).collect())
}

/// Get a message by id, scoped through the enclosing chat's creator
pub async fn get_by_id(pool: &SqlitePool, id: i64, chat_owner_id: i64) -> Result<Option<Message>> {
    let row = sqlx::query(
        "SELECT m.id, m.chat_id, m.user_id, m.text, m.created_at
         FROM messages m
         INNER JOIN chats c ON m.chat_id = c.id
         WHERE m.id = ? AND c.creator_id = ?",
    )
    .bind(id)
    .bind(chat_owner_id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|r| map_message(&r)))
}

/// Overwrite a message's text.
///
/// The chat must belong to the caller and the message must be theirs;
/// assistant-authored rows are untouchable through this path.
pub async fn update(pool: &SqlitePool, id: i64, author_id: i64, text: &str) -> Result<bool> {
    let result = sqlx::query(
        "UPDATE messages SET text = ?
         WHERE id = ? AND user_id = ?
           AND chat_id IN (SELECT id FROM chats WHERE creator_id = ?)",
    )
    .bind(text)
    .bind(id)
    .bind(author_id)
    .bind(author_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Hard-delete a message the caller authored in one of their chats
pub async fn delete(pool: &SqlitePool, id: i64, author_id: i64) -> Result<bool> {
    let result = sqlx::query(
        "DELETE FROM messages
         WHERE id = ? AND user_id = ?
           AND chat_id IN (SELECT id FROM chats WHERE creator_id = ?)",
    )
    .bind(id)
    .bind(author_id)
    .bind(author_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Persist one complete conversation turn atomically.
///
/// Inserts the user's message, the raw assistant reply into the audit trail
/// (keyed by the user message it answers), and the assistant's visible
/// message, in that order. Either all three rows land or none do.
///
/// `user_at` is the user message's timestamp, taken by the caller before the
/// assistant round trip; the assistant message is stamped here.
pub async fn record_turn(
    pool: &SqlitePool,
    chat_id: i64,
    user_id: i64,
    user_text: &str,
    user_at: &str,
    assistant_user_id: i64,
    assistant_text: &str,
    raw_reply: &str,
) -> Result<(Message, Message)> {
    let mut tx = pool.begin().await?;

    let created_at = user_at.to_string();
    let user_row = sqlx::query(
        "INSERT INTO messages (chat_id, user_id, text, created_at) VALUES (?, ?, ?, ?)",
    )
    .bind(chat_id)
    .bind(user_id)
    .bind(user_text)
    .bind(&created_at)
    .execute(&mut *tx)
    .await?;
    let user_message_id = user_row.last_insert_rowid();

    crate::audit::append(&mut tx, user_message_id, raw_reply).await?;

    let assistant_at = now_utc();
    let assistant_row = sqlx::query(
        "INSERT INTO messages (chat_id, user_id, text, created_at) VALUES (?, ?, ?, ?)",
    )
    .bind(chat_id)
    .bind(assistant_user_id)
    .bind(assistant_text)
    .bind(&assistant_at)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok((
        Message {
            id: user_message_id,
            chat_id,
            user_id,
            text: user_text.to_string(),
            created_at,
        },
        Message {
            id: assistant_row.last_insert_rowid(),
            chat_id,
            user_id: assistant_user_id,
            text: assistant_text.to_string(),
            created_at: assistant_at,
        },
    ))
}
