/// Playlist domain types
use serde::{Deserialize, Serialize};

/// Playlist with an explicitly ordered song membership
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playlist {
    pub id: i64,
    pub name: String,
    pub is_shuffled: bool,
    pub owner_id: i64,

    /// Membership entries (optional, populated when requested)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub songs: Option<Vec<PlaylistEntry>>,
}

/// Song membership in a playlist with denormalized display fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistEntry {
    pub song_id: i64,
    pub position: i64,

    /// Denormalized fields for display
    pub title: Option<String>,
    pub artist: Option<String>,
}

/// Caller-supplied playlist shape.
///
/// When `songs` is present on update, the submitted sequence replaces the
/// playlist's entire association set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlaylistInput {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub is_shuffled: Option<bool>,
    pub songs: Option<Vec<PlaylistEntryInput>>,
}

/// One submitted `{song_id, position}` pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistEntryInput {
    pub song_id: i64,
    pub position: i64,
}

impl PlaylistInput {
    /// Input that selects a playlist by id
    pub fn by_id(id: i64) -> Self {
        Self {
            id: Some(id),
            ..Self::default()
        }
    }

    /// Input that selects a playlist by name (matched case-insensitively)
    pub fn by_name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }
}
