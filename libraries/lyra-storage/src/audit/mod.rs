//! Append-only audit trail of raw assistant replies
//!
//! Runtime logic never reads this table; it exists for offline inspection of
//! what the upstream model actually said before parsing.

use crate::error::Result;
use crate::now_utc;
use sqlx::{Sqlite, Transaction};

/// Append one raw reply inside the caller's transaction.
///
/// `message_id` is the user message the reply answers, so a turn can be
/// reconstructed even when parsing fell back.
pub async fn append(
    tx: &mut Transaction<'_, Sqlite>,
    message_id: i64,
    raw_reply: &str,
) -> Result<()> {
    sqlx::query("INSERT INTO assistant_audit (message_id, raw_reply, created_at) VALUES (?, ?, ?)")
        .bind(message_id)
        .bind(raw_reply)
        .bind(now_utc())
        .execute(&mut **tx)
        .await?;

    Ok(())
}

/// Number of audit rows recorded for a chat's messages.
///
/// Used by operational tooling and tests; not on any request path.
pub async fn count_for_chat(pool: &sqlx::SqlitePool, chat_id: i64) -> Result<i64> {
    let row: (i64,) = sqlx::query_as(
        "SELECT COUNT(*)
         FROM assistant_audit a
         INNER JOIN messages m ON a.message_id = m.id
         WHERE m.chat_id = ?",
    )
    .bind(chat_id)
    .fetch_one(pool)
    .await?;

    Ok(row.0)
}
