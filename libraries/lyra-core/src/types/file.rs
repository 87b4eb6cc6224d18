/// Audio file domain types
use serde::{Deserialize, Serialize};

/// Stored audio file reference.
///
/// `path` is an opaque token resolved by the media store; ownership is
/// transitive through the parent song's owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioFile {
    pub id: i64,
    pub path: String,
    pub song_id: i64,
}

/// Caller-supplied file shape.
///
/// `file_name` and `data` are only meaningful on create; `song_id` doubles as
/// a `get_many` narrowing filter.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AudioFileInput {
    pub id: Option<i64>,
    pub song_id: Option<i64>,
    pub file_name: Option<String>,
    #[serde(skip)]
    pub data: Option<Vec<u8>>,
}

impl AudioFileInput {
    /// Input that selects a file by id
    pub fn by_id(id: i64) -> Self {
        Self {
            id: Some(id),
            ..Self::default()
        }
    }

    /// Filter that narrows `get_many` to one parent song
    pub fn for_song(song_id: i64) -> Self {
        Self {
            song_id: Some(song_id),
            ..Self::default()
        }
    }
}
