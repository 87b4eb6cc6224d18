//! Lyra Server Library
//!
//! Multi-user media library server with authentication, blob storage, and an
//! assistant-backed conversation engine.
//!
//! This library exposes the core components for testing purposes.

pub mod api;
pub mod config;
pub mod error;
pub mod executor;
pub mod middleware;
pub mod services;
pub mod state;

// Re-export commonly used types for convenience
pub use config::ServerConfig;
pub use error::{Result, ServerError};
pub use services::{
    assistant::{AssistantGateway, OpenAiAssistant},
    auth::AuthService,
    media_store::MediaStore,
};
pub use state::AppState;
