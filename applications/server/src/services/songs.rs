/// Song CRUD service
use crate::services::{db_err, resolve_owner};
use async_trait::async_trait;
use lyra_core::types::{Song, SongInput};
use lyra_core::{CrudService, Identity, OpReject, OpResult};
use sqlx::SqlitePool;

pub struct SongService {
    pool: SqlitePool,
}

impl SongService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CrudService for SongService {
    type Input = SongInput;
    type Entity = Song;

    async fn get_one(&self, identity: &Identity, input: SongInput) -> OpResult<Song> {
        let owner = resolve_owner(&self.pool, identity).await?;

        // Id takes precedence over title
        if let Some(id) = input.id {
            return lyra_storage::songs::get_by_id(&self.pool, id, owner.id)
                .await
                .map_err(db_err)?
                .ok_or_else(|| OpReject::new(format!("Song with ID: {id} not found")));
        }

        if let Some(title) = input.title {
            return lyra_storage::songs::find_by_title(&self.pool, &title, owner.id)
                .await
                .map_err(db_err)?
                .ok_or_else(|| OpReject::new(format!("Song with title: {title} not found")));
        }

        Err(OpReject::new("Song ID not provided"))
    }

    async fn get_many(
        &self,
        identity: &Identity,
        filter: Option<SongInput>,
    ) -> OpResult<Vec<Song>> {
        let owner = resolve_owner(&self.pool, identity).await?;

        if let Some(title) = filter.and_then(|f| f.title) {
            let found = lyra_storage::songs::find_by_title(&self.pool, &title, owner.id)
                .await
                .map_err(db_err)?;
            return Ok(found.into_iter().collect());
        }

        lyra_storage::songs::list(&self.pool, owner.id)
            .await
            .map_err(db_err)
    }

    async fn create(&self, identity: &Identity, input: SongInput) -> OpResult<Song> {
        let owner = resolve_owner(&self.pool, identity).await?;

        let Some(title) = input.title else {
            return Err(OpReject::new("Song title not provided"));
        };

        let existing = lyra_storage::songs::find_by_exact_title(&self.pool, &title, owner.id)
            .await
            .map_err(db_err)?;
        if existing.is_some() {
            return Err(OpReject::new("Song with similar configuration already exists"));
        }

        lyra_storage::songs::create(
            &self.pool,
            owner.id,
            &title,
            input.artist.as_deref().unwrap_or_default(),
            input.description.as_deref().unwrap_or_default(),
        )
        .await
        .map_err(db_err)
    }

    async fn update(&self, identity: &Identity, input: SongInput) -> OpResult<Song> {
        let owner = resolve_owner(&self.pool, identity).await?;

        let Some(id) = input.id else {
            return Err(OpReject::new("Song ID not provided"));
        };

        let Some(mut song) = lyra_storage::songs::get_by_id(&self.pool, id, owner.id)
            .await
            .map_err(db_err)?
        else {
            return Err(OpReject::new(format!("Song with ID: {id} not found")));
        };

        if let Some(title) = input.title {
            song.title = title;
        }
        if let Some(artist) = input.artist {
            song.artist = artist;
        }
        if let Some(description) = input.description {
            song.description = description;
        }

        if !lyra_storage::songs::update(&self.pool, &song)
            .await
            .map_err(db_err)?
        {
            return Err(OpReject::new(format!("Song with ID: {id} not found")));
        }

        Ok(song)
    }

    async fn delete(&self, identity: &Identity, input: SongInput) -> OpResult<Song> {
        let owner = resolve_owner(&self.pool, identity).await?;

        let Some(id) = input.id else {
            return Err(OpReject::new("Song ID not provided"));
        };

        let Some(song) = lyra_storage::songs::get_by_id(&self.pool, id, owner.id)
            .await
            .map_err(db_err)?
        else {
            return Err(OpReject::new(format!("Song with ID: {id} not found")));
        };

        if !lyra_storage::songs::delete(&self.pool, id, owner.id)
            .await
            .map_err(db_err)?
        {
            return Err(OpReject::new(format!("Song with ID: {id} not found")));
        }

        Ok(song)
    }
}
