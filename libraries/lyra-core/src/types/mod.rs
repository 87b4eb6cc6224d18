mod chat;
mod file;
mod playlist;
mod song;
mod user;

pub use chat::{Chat, ChatInput, Message, MessageInput};
pub use file::{AudioFile, AudioFileInput};
pub use playlist::{Playlist, PlaylistEntry, PlaylistEntryInput, PlaylistInput};
pub use song::{Song, SongInput};
pub use user::{ProfileUpdate, User};
