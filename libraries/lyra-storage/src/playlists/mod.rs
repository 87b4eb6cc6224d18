//! Playlist queries and the ordered-association synchronizer

use crate::error::{Result, StorageError};
use lyra_core::types::{Playlist, PlaylistEntry, PlaylistEntryInput};
use sqlx::{Row, SqlitePool};

fn map_playlist(row: &sqlx::sqlite::SqliteRow) -> Playlist {
    Playlist {
        id: row.get("id"),
        name: row.get("name"),
        is_shuffled: row.get::<i64, _>("is_shuffled") != 0,
        owner_id: row.get("owner_id"),
        songs: None,
    }
}

/// Get a playlist by id, owner-scoped
pub async fn get_by_id(pool: &SqlitePool, id: i64, owner_id: i64) -> Result<Option<Playlist>> {
    let row = sqlx::query(
        "SELECT id, name, is_shuffled, owner_id
         FROM playlists WHERE id = ? AND owner_id = ?",
    )
    .bind(id)
    .bind(owner_id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|r| map_playlist(&r)))
}

/// Find the first playlist whose name matches case-insensitively, owner-scoped
pub async fn find_by_name(pool: &SqlitePool, name: &str, owner_id: i64) -> Result<Option<Playlist>> {
    let row = sqlx::query(
        "SELECT id, name, is_shuffled, owner_id
         FROM playlists WHERE LOWER(name) = LOWER(?) AND owner_id = ?
         LIMIT 1",
    )
    .bind(name)
    .bind(owner_id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|r| map_playlist(&r)))
}

/// Find a playlist with exactly this name, owner-scoped (uniqueness probe)
pub async fn find_by_exact_name(
    pool: &SqlitePool,
    name: &str,
    owner_id: i64,
) -> Result<Option<Playlist>> {
    let row = sqlx::query(
        "SELECT id, name, is_shuffled, owner_id
         FROM playlists WHERE name = ? AND owner_id = ?
         LIMIT 1",
    )
    .bind(name)
    .bind(owner_id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|r| map_playlist(&r)))
}

/// List the user's playlists
pub async fn list(pool: &SqlitePool, owner_id: i64) -> Result<Vec<Playlist>> {
    let rows = sqlx::query(
        "SELECT id, name, is_shuffled, owner_id
         FROM playlists WHERE owner_id = ? ORDER BY id",
    )
    .bind(owner_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().map(map_playlist).collect())
}

/// Ordered membership of a playlist with denormalized song fields.
///
/// Position ties are returned in insertion order (rowid), which for a
/// replaced set is the submission order.
pub async fn songs_of(pool: &SqlitePool, playlist_id: i64) -> Result<Vec<PlaylistEntry>> {
    let rows = sqlx::query(
        "SELECT ps.song_id, ps.position, s.title, s.artist
         FROM playlist_songs ps
         INNER JOIN songs s ON ps.song_id = s.id
         WHERE ps.playlist_id = ?
         ORDER BY ps.position, ps.rowid",
    )
    .bind(playlist_id)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|row| PlaylistEntry {
            song_id: row.get("song_id"),
            position: row.get("position"),
            title: Some(row.get("title")),
            artist: Some(row.get("artist")),
        })
        .collect())
}

/// Create a new playlist with an empty association list
pub async fn create(
    pool: &SqlitePool,
    owner_id: i64,
    name: &str,
    is_shuffled: bool,
) -> Result<Playlist> {
    let result = sqlx::query("INSERT INTO playlists (name, is_shuffled, owner_id) VALUES (?, ?, ?)")
        .bind(name)
        .bind(i64::from(is_shuffled))
        .bind(owner_id)
        .execute(pool)
        .await?;

    Ok(Playlist {
        id: result.last_insert_rowid(),
        name: name.to_string(),
        is_shuffled,
        owner_id,
        songs: Some(Vec::new()),
    })
}

/// Overwrite a playlist's mutable fields and, when `entries` is present,
/// replace its entire association set with the submitted sequence.
///
/// Replacement is deliberate full-replace, not a diff: every previous
/// association row is discarded and one row is inserted per submitted
/// `{song_id, position}` pair, in submission order. Submitted songs must be
/// owned by the playlist's owner; a foreign or unknown song id aborts the
/// transaction. Returns false when no playlist with this id is owned by the
/// user.
pub async fn update(
    pool: &SqlitePool,
    playlist: &Playlist,
    entries: Option<&[PlaylistEntryInput]>,
) -> Result<bool> {
    let mut tx = pool.begin().await?;

    let result = sqlx::query(
        "UPDATE playlists SET name = ?, is_shuffled = ?
         WHERE id = ? AND owner_id = ?",
    )
    .bind(&playlist.name)
    .bind(i64::from(playlist.is_shuffled))
    .bind(playlist.id)
    .bind(playlist.owner_id)
    .execute(&mut *tx)
    .await?;

    if result.rows_affected() == 0 {
        return Ok(false);
    }

    if let Some(entries) = entries {
        // Every referenced song must belong to the playlist's owner
        for entry in entries {
            let owned = sqlx::query("SELECT 1 FROM songs WHERE id = ? AND owner_id = ?")
                .bind(entry.song_id)
                .bind(playlist.owner_id)
                .fetch_optional(&mut *tx)
                .await?;
            if owned.is_none() {
                return Err(StorageError::not_found("Song", entry.song_id));
            }
        }

        sqlx::query("DELETE FROM playlist_songs WHERE playlist_id = ?")
            .bind(playlist.id)
            .execute(&mut *tx)
            .await?;

        for entry in entries {
            sqlx::query(
                "INSERT INTO playlist_songs (playlist_id, song_id, position) VALUES (?, ?, ?)",
            )
            .bind(playlist.id)
            .bind(entry.song_id)
            .bind(entry.position)
            .execute(&mut *tx)
            .await?;
        }
    }

    tx.commit().await?;

    Ok(true)
}

/// Hard-delete a playlist, owner-scoped; association rows cascade
pub async fn delete(pool: &SqlitePool, id: i64, owner_id: i64) -> Result<bool> {
    let result = sqlx::query("DELETE FROM playlists WHERE id = ? AND owner_id = ?")
        .bind(id)
        .bind(owner_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
