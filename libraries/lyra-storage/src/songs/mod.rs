//! Song queries, scoped to the owning user

use crate::error::Result;
use lyra_core::types::Song;
use sqlx::{Row, SqlitePool};

fn map_song(row: &sqlx::sqlite::SqliteRow) -> Song {
    Song {
        id: row.get("id"),
        title: row.get("title"),
        artist: row.get("artist"),
        description: row.get("description"),
        owner_id: row.get("owner_id"),
    }
}

/// Get a song by id, owner-scoped
pub async fn get_by_id(pool: &SqlitePool, id: i64, owner_id: i64) -> Result<Option<Song>> {
    let row = sqlx::query(
        "SELECT id, title, artist, description, owner_id
         FROM songs WHERE id = ? AND owner_id = ?",
    )
    .bind(id)
    .bind(owner_id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|r| map_song(&r)))
}

/// Find the first song whose title matches case-insensitively, owner-scoped
pub async fn find_by_title(pool: &SqlitePool, title: &str, owner_id: i64) -> Result<Option<Song>> {
    let row = sqlx::query(
        "SELECT id, title, artist, description, owner_id
         FROM songs WHERE LOWER(title) = LOWER(?) AND owner_id = ?
         LIMIT 1",
    )
    .bind(title)
    .bind(owner_id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|r| map_song(&r)))
}

/// Find a song with exactly this title, owner-scoped (uniqueness probe)
pub async fn find_by_exact_title(
    pool: &SqlitePool,
    title: &str,
    owner_id: i64,
) -> Result<Option<Song>> {
    let row = sqlx::query(
        "SELECT id, title, artist, description, owner_id
         FROM songs WHERE title = ? AND owner_id = ?
         LIMIT 1",
    )
    .bind(title)
    .bind(owner_id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|r| map_song(&r)))
}

/// List all songs owned by the user
pub async fn list(pool: &SqlitePool, owner_id: i64) -> Result<Vec<Song>> {
    let rows = sqlx::query(
        "SELECT id, title, artist, description, owner_id
         FROM songs WHERE owner_id = ? ORDER BY id",
    )
    .bind(owner_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().map(map_song).collect())
}

/// Create a new song owned by the user
pub async fn create(
    pool: &SqlitePool,
    owner_id: i64,
    title: &str,
    artist: &str,
    description: &str,
) -> Result<Song> {
    let result = sqlx::query(
        "INSERT INTO songs (title, artist, description, owner_id) VALUES (?, ?, ?, ?)",
    )
    .bind(title)
    .bind(artist)
    .bind(description)
    .bind(owner_id)
    .execute(pool)
    .await?;

    Ok(Song {
        id: result.last_insert_rowid(),
        title: title.to_string(),
        artist: artist.to_string(),
        description: description.to_string(),
        owner_id,
    })
}

/// Overwrite a song's mutable fields, owner-scoped.
///
/// Returns true when a row was updated.
pub async fn update(pool: &SqlitePool, song: &Song) -> Result<bool> {
    let result = sqlx::query(
        "UPDATE songs SET title = ?, artist = ?, description = ?
         WHERE id = ? AND owner_id = ?",
    )
    .bind(&song.title)
    .bind(&song.artist)
    .bind(&song.description)
    .bind(song.id)
    .bind(song.owner_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Hard-delete a song, owner-scoped.
///
/// Dependent file rows and playlist memberships go with it (cascade);
/// backing blobs are released only through the file service.
pub async fn delete(pool: &SqlitePool, id: i64, owner_id: i64) -> Result<bool> {
    let result = sqlx::query("DELETE FROM songs WHERE id = ? AND owner_id = ?")
        .bind(id)
        .bind(owner_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
