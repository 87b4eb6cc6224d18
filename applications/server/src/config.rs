/// Server configuration
use crate::error::{Result, ServerError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_server")]
    pub server: ServerSettings,

    #[serde(default = "default_storage")]
    pub storage: StorageSettings,

    #[serde(default = "default_auth")]
    pub auth: AuthSettings,

    #[serde(default = "default_assistant")]
    pub assistant: AssistantSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageSettings {
    #[serde(default = "default_database_url")]
    pub database_url: String,

    #[serde(default = "default_media_storage_path")]
    pub media_storage_path: PathBuf,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthSettings {
    pub jwt_secret: String,

    #[serde(default = "default_jwt_expiration_hours")]
    pub jwt_expiration_hours: u64,

    #[serde(default = "default_jwt_refresh_expiration_days")]
    pub jwt_refresh_expiration_days: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AssistantSettings {
    /// OpenAI-compatible chat completions base URL
    #[serde(default = "default_assistant_base_url")]
    pub base_url: String,

    #[serde(default = "default_assistant_model")]
    pub model: String,

    /// Optional; local backends usually need none
    #[serde(default)]
    pub api_key: String,

    /// Username of the reserved account that authors assistant messages
    #[serde(default = "default_assistant_username")]
    pub reserved_username: String,

    #[serde(default = "default_assistant_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl ServerConfig {
    /// Load configuration from file and environment
    pub fn load() -> Result<Self> {
        let mut settings = config::Config::builder();

        // Load from config file if it exists
        let config_path = PathBuf::from("config.toml");
        if config_path.exists() {
            settings = settings.add_source(config::File::from(config_path));
        }

        // Override with environment variables. The section separator is a
        // double underscore so multi-word keys survive the split:
        // LYRA_AUTH__JWT_SECRET -> auth.jwt_secret
        settings = settings.add_source(
            config::Environment::with_prefix("LYRA")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| ServerError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| ServerError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.auth.jwt_secret.is_empty() {
            return Err(ServerError::Config(
                "JWT secret is required (set LYRA_AUTH__JWT_SECRET)".to_string(),
            ));
        }

        if self.assistant.reserved_username.is_empty() {
            return Err(ServerError::Config(
                "Assistant reserved username must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}

// Default values
fn default_server() -> ServerSettings {
    ServerSettings {
        host: default_host(),
        port: default_port(),
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_storage() -> StorageSettings {
    StorageSettings {
        database_url: default_database_url(),
        media_storage_path: default_media_storage_path(),
    }
}

fn default_database_url() -> String {
    "sqlite://./data/lyra.db".to_string()
}

fn default_media_storage_path() -> PathBuf {
    PathBuf::from("./data/media")
}

fn default_auth() -> AuthSettings {
    AuthSettings {
        jwt_secret: String::new(),
        jwt_expiration_hours: default_jwt_expiration_hours(),
        jwt_refresh_expiration_days: default_jwt_refresh_expiration_days(),
    }
}

fn default_jwt_expiration_hours() -> u64 {
    24
}

fn default_jwt_refresh_expiration_days() -> u64 {
    30
}

fn default_assistant() -> AssistantSettings {
    AssistantSettings {
        base_url: default_assistant_base_url(),
        model: default_assistant_model(),
        api_key: String::new(),
        reserved_username: default_assistant_username(),
        request_timeout_secs: default_assistant_timeout_secs(),
    }
}

fn default_assistant_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_assistant_model() -> String {
    "gpt-4o".to_string()
}

fn default_assistant_username() -> String {
    "ChatGPT".to_string()
}

fn default_assistant_timeout_secs() -> u64 {
    60
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            server: default_server(),
            storage: default_storage(),
            auth: default_auth(),
            assistant: default_assistant(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Single test touching the process environment; splitting it up would
    // race against parallel test threads.
    #[test]
    fn test_env_overrides_reach_nested_keys() {
        std::env::set_var("LYRA_AUTH__JWT_SECRET", "supersecret");
        std::env::set_var("LYRA_STORAGE__DATABASE_URL", "sqlite://./override.db");
        std::env::set_var("LYRA_ASSISTANT__BASE_URL", "http://localhost:11434/v1");

        let result = ServerConfig::load();

        std::env::remove_var("LYRA_AUTH__JWT_SECRET");
        std::env::remove_var("LYRA_STORAGE__DATABASE_URL");
        std::env::remove_var("LYRA_ASSISTANT__BASE_URL");

        let config = result.expect("Failed to load config");
        assert_eq!(config.auth.jwt_secret, "supersecret");
        assert_eq!(config.storage.database_url, "sqlite://./override.db");
        assert_eq!(config.assistant.base_url, "http://localhost:11434/v1");

        // Untouched sections keep their defaults
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.auth.jwt_expiration_hours, 24);
    }

    #[test]
    fn test_validate_requires_jwt_secret() {
        let config = ServerConfig::default();
        let err = config.validate().expect_err("Empty secret must fail");
        assert!(err.to_string().contains("LYRA_AUTH__JWT_SECRET"));
    }
}
