/// Business services
pub mod assistant;
pub mod auth;
pub mod chats;
pub mod files;
pub mod media_store;
pub mod messages;
pub mod playlists;
pub mod songs;

pub use assistant::{AssistantGateway, OpenAiAssistant};
pub use auth::AuthService;
pub use chats::ChatService;
pub use files::FileService;
pub use media_store::MediaStore;
pub use messages::MessageService;
pub use playlists::PlaylistService;
pub use songs::SongService;

use lyra_core::{Identity, OpReject, OpResult};
use lyra_core::types::User;
use sqlx::SqlitePool;

pub(crate) fn db_err(e: lyra_storage::StorageError) -> OpReject {
    OpReject::new(e.to_string())
}

/// Resolve the acting user from the caller identity.
///
/// Resolution happens freshly on every call; a missing username or a vanished
/// row both reject with the same message.
pub(crate) async fn resolve_owner(pool: &SqlitePool, identity: &Identity) -> OpResult<User> {
    let Some(username) = identity.username() else {
        return Err(OpReject::user_not_found());
    };

    lyra_storage::users::find_by_username(pool, username)
        .await
        .map_err(db_err)?
        .ok_or_else(OpReject::user_not_found)
}
