//! Audio file reference queries
//!
//! Files have no owner column of their own; every query authorizes
//! transitively through the parent song's owner.

use crate::error::Result;
use lyra_core::types::AudioFile;
use sqlx::{Row, SqlitePool};

fn map_file(row: &sqlx::sqlite::SqliteRow) -> AudioFile {
    AudioFile {
        id: row.get("id"),
        path: row.get("path"),
        song_id: row.get("song_id"),
    }
}

/// Get a file by id, scoped through the parent song's owner
pub async fn get_by_id(pool: &SqlitePool, id: i64, owner_id: i64) -> Result<Option<AudioFile>> {
    let row = sqlx::query(
        "SELECT f.id, f.path, f.song_id
         FROM files f
         INNER JOIN songs s ON f.song_id = s.id
         WHERE f.id = ? AND s.owner_id = ?",
    )
    .bind(id)
    .bind(owner_id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|r| map_file(&r)))
}

/// List files reachable from the user's songs, optionally narrowed to one song
pub async fn list(
    pool: &SqlitePool,
    owner_id: i64,
    song_id: Option<i64>,
) -> Result<Vec<AudioFile>> {
    let rows = match song_id {
        Some(song_id) => {
            sqlx::query(
                "SELECT f.id, f.path, f.song_id
                 FROM files f
                 INNER JOIN songs s ON f.song_id = s.id
                 WHERE s.owner_id = ? AND f.song_id = ?
                 ORDER BY f.id",
            )
            .bind(owner_id)
            .bind(song_id)
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query(
                "SELECT f.id, f.path, f.song_id
                 FROM files f
                 INNER JOIN songs s ON f.song_id = s.id
                 WHERE s.owner_id = ?
                 ORDER BY f.id",
            )
            .bind(owner_id)
            .fetch_all(pool)
            .await?
        }
    };

    Ok(rows.iter().map(map_file).collect())
}

/// Create a file row under a song the user owns.
///
/// Returns `None` when the song does not exist or belongs to someone else.
pub async fn create(
    pool: &SqlitePool,
    owner_id: i64,
    song_id: i64,
    path: &str,
) -> Result<Option<AudioFile>> {
    // Ownership by construction: refuse to attach to a foreign song
    let owned = crate::songs::get_by_id(pool, song_id, owner_id).await?;
    if owned.is_none() {
        return Ok(None);
    }

    let result = sqlx::query("INSERT INTO files (path, song_id) VALUES (?, ?)")
        .bind(path)
        .bind(song_id)
        .execute(pool)
        .await?;

    Ok(Some(AudioFile {
        id: result.last_insert_rowid(),
        path: path.to_string(),
        song_id,
    }))
}

/// Hard-delete a file row, scoped through the parent song's owner
pub async fn delete(pool: &SqlitePool, id: i64, owner_id: i64) -> Result<bool> {
    let result = sqlx::query(
        "DELETE FROM files
         WHERE id = ? AND song_id IN (SELECT id FROM songs WHERE owner_id = ?)",
    )
    .bind(id)
    .bind(owner_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}
