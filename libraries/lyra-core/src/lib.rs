//! Lyra Core
//!
//! Transport-agnostic core types and contracts for the Lyra media library.
//!
//! This crate defines:
//! - **Domain Types**: `User`, `Song`, `AudioFile`, `Playlist`, `Chat`, `Message`
//! - **Result Algebra**: `OpResult` / `OpReject` — the two-variant outcome every
//!   service operation returns
//! - **Service Contract**: the generic [`CrudService`] trait implemented once per
//!   entity type
//! - **Assistant Reply**: the structured `{type, data, textResponse}` reply and
//!   its best-effort parser
//!
//! No I/O happens here; persistence and transport live in `lyra-storage` and the
//! server application.

#![forbid(unsafe_code)]

pub mod crud;
pub mod identity;
pub mod outcome;
pub mod reply;
pub mod types;

// Re-export commonly used types
pub use crud::CrudService;
pub use identity::Identity;
pub use outcome::{OpReject, OpResult};
pub use reply::{AssistantReply, ReplyData, ReplyKind, FALLBACK_TEXT};

// Export all domain types
pub use types::{
    AudioFile, AudioFileInput, Chat, ChatInput, Message, MessageInput, Playlist, PlaylistEntry,
    PlaylistEntryInput, PlaylistInput, ProfileUpdate, Song, SongInput, User,
};
