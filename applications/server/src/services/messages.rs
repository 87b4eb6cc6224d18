/// Message CRUD service and the conversation engine
///
/// `create` is one full conversation turn: ask the assistant, parse its raw
/// reply best-effort, and persist the user message, the raw-reply audit row
/// and the assistant message atomically.
use crate::services::{db_err, resolve_owner, AssistantGateway};
use async_trait::async_trait;
use lyra_core::reply::AssistantReply;
use lyra_core::types::{Message, MessageInput};
use lyra_core::{CrudService, Identity, OpReject, OpResult};
use sqlx::SqlitePool;
use std::sync::Arc;

pub struct MessageService {
    pool: SqlitePool,
    assistant: Arc<dyn AssistantGateway>,
    assistant_user_id: i64,
}

impl MessageService {
    pub fn new(
        pool: SqlitePool,
        assistant: Arc<dyn AssistantGateway>,
        assistant_user_id: i64,
    ) -> Self {
        Self {
            pool,
            assistant,
            assistant_user_id,
        }
    }
}

#[async_trait]
impl CrudService for MessageService {
    type Input = MessageInput;
    type Entity = Message;

    async fn get_one(&self, _identity: &Identity, _input: MessageInput) -> OpResult<Message> {
        // Messages are read through their chat
        Err(OpReject::new("Not supported"))
    }

    async fn get_many(
        &self,
        _identity: &Identity,
        _filter: Option<MessageInput>,
    ) -> OpResult<Vec<Message>> {
        Err(OpReject::new("Not supported"))
    }

    async fn create(&self, identity: &Identity, input: MessageInput) -> OpResult<Message> {
        let owner = resolve_owner(&self.pool, identity).await?;

        let Some(chat_id) = input.chat_id else {
            return Err(OpReject::new("Chat ID not provided"));
        };
        let Some(text) = input.text else {
            return Err(OpReject::new("Message text not provided"));
        };

        if lyra_storage::chats::get_by_id(&self.pool, chat_id, owner.id)
            .await
            .map_err(db_err)?
            .is_none()
        {
            return Err(OpReject::new("Chat not found or not accessible"));
        }

        // The user message is stamped now, before the assistant round trip
        let user_at = lyra_storage::now_utc();

        // A transport failure degrades to an empty raw reply; the parser turns
        // that into the fallback answer. Never a hard failure.
        let raw_reply = match self.assistant.ask(&text).await {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!("Assistant request degraded to fallback: {}", e);
                String::new()
            }
        };

        let reply = AssistantReply::parse(&raw_reply);

        let (_user_message, assistant_message) = lyra_storage::messages::record_turn(
            &self.pool,
            chat_id,
            owner.id,
            &text,
            &user_at,
            self.assistant_user_id,
            &reply.text_response,
            &raw_reply,
        )
        .await
        .map_err(db_err)?;

        Ok(assistant_message)
    }

    async fn update(&self, identity: &Identity, input: MessageInput) -> OpResult<Message> {
        let owner = resolve_owner(&self.pool, identity).await?;

        let Some(id) = input.id else {
            return Err(OpReject::new("Message ID not provided"));
        };
        let Some(text) = input.text else {
            return Err(OpReject::new("Message text not provided"));
        };

        if !lyra_storage::messages::update(&self.pool, id, owner.id, &text)
            .await
            .map_err(db_err)?
        {
            return Err(OpReject::new("Message not found or not accessible"));
        }

        lyra_storage::messages::get_by_id(&self.pool, id, owner.id)
            .await
            .map_err(db_err)?
            .ok_or_else(|| OpReject::new("Message not found or not accessible"))
    }

    async fn delete(&self, identity: &Identity, input: MessageInput) -> OpResult<Message> {
        let owner = resolve_owner(&self.pool, identity).await?;

        let Some(id) = input.id else {
            return Err(OpReject::new("Message ID not provided"));
        };

        let Some(message) = lyra_storage::messages::get_by_id(&self.pool, id, owner.id)
            .await
            .map_err(db_err)?
        else {
            return Err(OpReject::new("Message not found or not accessible"));
        };

        if !lyra_storage::messages::delete(&self.pool, id, owner.id)
            .await
            .map_err(db_err)?
        {
            return Err(OpReject::new("Message not found or not accessible"));
        }

        Ok(message)
    }
}
