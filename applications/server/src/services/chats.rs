/// Chat CRUD service
use crate::services::{db_err, resolve_owner};
use async_trait::async_trait;
use lyra_core::types::{Chat, ChatInput};
use lyra_core::{CrudService, Identity, OpReject, OpResult};
use sqlx::SqlitePool;

pub struct ChatService {
    pool: SqlitePool,
    assistant_user_id: i64,
}

impl ChatService {
    pub fn new(pool: SqlitePool, assistant_user_id: i64) -> Self {
        Self {
            pool,
            assistant_user_id,
        }
    }
}

#[async_trait]
impl CrudService for ChatService {
    type Input = ChatInput;
    type Entity = Chat;

    async fn get_one(&self, identity: &Identity, input: ChatInput) -> OpResult<Chat> {
        let owner = resolve_owner(&self.pool, identity).await?;

        let Some(id) = input.id else {
            return Err(OpReject::new("Chat ID not provided"));
        };

        lyra_storage::chats::get_with_messages(&self.pool, id, owner.id)
            .await
            .map_err(db_err)?
            .ok_or_else(|| OpReject::new("Chat not found or not accessible"))
    }

    async fn get_many(
        &self,
        identity: &Identity,
        _filter: Option<ChatInput>,
    ) -> OpResult<Vec<Chat>> {
        let owner = resolve_owner(&self.pool, identity).await?;

        lyra_storage::chats::list(&self.pool, owner.id)
            .await
            .map_err(db_err)
    }

    async fn create(&self, identity: &Identity, input: ChatInput) -> OpResult<Chat> {
        let owner = resolve_owner(&self.pool, identity).await?;

        let Some(name) = input.name else {
            return Err(OpReject::new("Chat name not provided"));
        };

        lyra_storage::chats::create(&self.pool, owner.id, &name, self.assistant_user_id)
            .await
            .map_err(db_err)
    }

    async fn update(&self, identity: &Identity, input: ChatInput) -> OpResult<Chat> {
        let owner = resolve_owner(&self.pool, identity).await?;

        let Some(id) = input.id else {
            return Err(OpReject::new("Chat ID not provided"));
        };
        let Some(name) = input.name else {
            return Err(OpReject::new("Chat name not provided"));
        };

        if !lyra_storage::chats::update(&self.pool, id, owner.id, &name)
            .await
            .map_err(db_err)?
        {
            return Err(OpReject::new("Chat not found or not accessible"));
        }

        lyra_storage::chats::get_by_id(&self.pool, id, owner.id)
            .await
            .map_err(db_err)?
            .ok_or_else(|| OpReject::new("Chat not found or not accessible"))
    }

    async fn delete(&self, identity: &Identity, input: ChatInput) -> OpResult<Chat> {
        let owner = resolve_owner(&self.pool, identity).await?;

        let Some(id) = input.id else {
            return Err(OpReject::new("Chat ID not provided"));
        };

        let Some(chat) = lyra_storage::chats::get_by_id(&self.pool, id, owner.id)
            .await
            .map_err(db_err)?
        else {
            return Err(OpReject::new("Chat not found or not accessible"));
        };

        if !lyra_storage::chats::delete(&self.pool, id, owner.id)
            .await
            .map_err(db_err)?
        {
            return Err(OpReject::new("Chat not found or not accessible"));
        }

        Ok(chat)
    }
}
