/// Chat and message domain types
use serde::{Deserialize, Serialize};

/// Conversation owned by a user.
///
/// Every chat holds at least the seed assistant message created alongside it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chat {
    pub id: i64,
    pub name: String,
    pub creator_id: i64,

    /// Messages in creation order (optional, populated when requested)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub messages: Option<Vec<Message>>,
}

/// One turn in a chat, authored either by the owner or the reserved
/// assistant user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: i64,
    pub chat_id: i64,
    pub user_id: i64,
    pub text: String,

    /// Creation timestamp (RFC 3339, UTC)
    pub created_at: String,
}

/// Caller-supplied chat shape
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatInput {
    pub id: Option<i64>,
    pub name: Option<String>,
}

/// Caller-supplied message shape
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessageInput {
    pub id: Option<i64>,
    pub chat_id: Option<i64>,
    pub text: Option<String>,
}

impl ChatInput {
    /// Input that selects a chat by id
    pub fn by_id(id: i64) -> Self {
        Self {
            id: Some(id),
            ..Self::default()
        }
    }
}
