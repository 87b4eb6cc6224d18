/// API route handlers
pub mod assistant;
pub mod auth;
pub mod chats;
pub mod files;
pub mod health;
pub mod messages;
pub mod playlists;
pub mod songs;
pub mod stream;
pub mod users;
