//! Lyra Storage
//!
//! Owner-scoped `SQLite` persistence layer for the Lyra media library.
//!
//! Every query in this crate is filtered by the acting user's id (for files,
//! transitively through the parent song). An unscoped query against an owned
//! entity type is an authorization bug, not a style choice.
//!
//! # Architecture
//!
//! - **Vertical Slicing**: each entity owns its own queries and logic
//! - **Single Source of Truth**: the relational store is the only shared
//!   mutable resource; there is no in-process cache
//! - **Explicit Transactions**: multi-write operations (playlist association
//!   replacement, chat seeding, conversation turns) commit atomically
//!
//! # Example
//!
//! ```rust,no_run
//! use lyra_storage::{create_pool, run_migrations};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = create_pool("sqlite://lyra.db").await?;
//! run_migrations(&pool).await?;
//!
//! let songs = lyra_storage::songs::list(&pool, 1).await?;
//! # Ok(())
//! # }
//! ```

mod error;

// Vertical slices
pub mod audit;
pub mod chats;
pub mod files;
pub mod messages;
pub mod playlists;
pub mod songs;
pub mod users;

pub use error::StorageError;

use sqlx::migrate::Migrator;
use sqlx::sqlite::SqlitePool;

// Embed migrations into binary
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Run database migrations
///
/// Called once at application start to bring the schema up to date.
///
/// # Errors
///
/// Returns [`StorageError::Migration`] if migrations fail to run
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), StorageError> {
    MIGRATOR
        .run(pool)
        .await
        .map_err(|e| StorageError::Migration(e.to_string()))
}

/// Create a new `SQLite` pool
///
/// # Arguments
///
/// * `database_url` - `SQLite` connection string (e.g., `sqlite://lyra.db`)
///
/// # Errors
///
/// Returns an error if the connection fails
pub async fn create_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
    use std::str::FromStr;

    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .foreign_keys(true)
        .busy_timeout(std::time::Duration::from_secs(30));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    Ok(pool)
}

/// Current UTC timestamp in the stored RFC 3339 form.
///
/// Public so callers that stamp an event before persisting it (the
/// conversation turn stamps the user message before the assistant round
/// trip) use the same clock and format as the queries in this crate.
pub fn now_utc() -> String {
    chrono::Utc::now().to_rfc3339()
}
