/// Song domain types
use serde::{Deserialize, Serialize};

/// Song owned by a user. One song can have multiple audio files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
    pub id: i64,
    pub title: String,
    pub artist: String,
    pub description: String,
    pub owner_id: i64,
}

/// Caller-supplied song shape (partially populated)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SongInput {
    pub id: Option<i64>,
    pub title: Option<String>,
    pub artist: Option<String>,
    pub description: Option<String>,
}

impl SongInput {
    /// Input that selects a song by id
    pub fn by_id(id: i64) -> Self {
        Self {
            id: Some(id),
            ..Self::default()
        }
    }

    /// Input that selects a song by title (matched case-insensitively)
    pub fn by_title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }
}
