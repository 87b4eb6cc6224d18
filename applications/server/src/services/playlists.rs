/// Playlist CRUD service
///
/// Update with a `songs` list present replaces the playlist's entire
/// association set with the submitted sequence.
use crate::services::{db_err, resolve_owner};
use async_trait::async_trait;
use lyra_core::types::{Playlist, PlaylistEntry, PlaylistInput};
use lyra_core::{CrudService, Identity, OpReject, OpResult};
use sqlx::SqlitePool;

pub struct PlaylistService {
    pool: SqlitePool,
}

impl PlaylistService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Ordered membership of an owned playlist with denormalized song fields
    pub async fn songs_of(
        &self,
        identity: &Identity,
        playlist_id: i64,
    ) -> OpResult<Vec<PlaylistEntry>> {
        let owner = resolve_owner(&self.pool, identity).await?;

        if lyra_storage::playlists::get_by_id(&self.pool, playlist_id, owner.id)
            .await
            .map_err(db_err)?
            .is_none()
        {
            return Err(OpReject::new(format!(
                "Playlist with ID: {playlist_id} not found"
            )));
        }

        lyra_storage::playlists::songs_of(&self.pool, playlist_id)
            .await
            .map_err(db_err)
    }
}

#[async_trait]
impl CrudService for PlaylistService {
    type Input = PlaylistInput;
    type Entity = Playlist;

    async fn get_one(&self, identity: &Identity, input: PlaylistInput) -> OpResult<Playlist> {
        let owner = resolve_owner(&self.pool, identity).await?;

        let found = if let Some(id) = input.id {
            lyra_storage::playlists::get_by_id(&self.pool, id, owner.id)
                .await
                .map_err(db_err)?
        } else if let Some(name) = input.name.as_deref() {
            lyra_storage::playlists::find_by_name(&self.pool, name, owner.id)
                .await
                .map_err(db_err)?
        } else {
            return Err(OpReject::new("Playlist ID not provided"));
        };

        let Some(mut playlist) = found else {
            return Err(OpReject::new("Playlist not found"));
        };

        playlist.songs = Some(
            lyra_storage::playlists::songs_of(&self.pool, playlist.id)
                .await
                .map_err(db_err)?,
        );

        Ok(playlist)
    }

    async fn get_many(
        &self,
        identity: &Identity,
        filter: Option<PlaylistInput>,
    ) -> OpResult<Vec<Playlist>> {
        let owner = resolve_owner(&self.pool, identity).await?;

        if let Some(name) = filter.and_then(|f| f.name) {
            let found = lyra_storage::playlists::find_by_name(&self.pool, &name, owner.id)
                .await
                .map_err(db_err)?;
            return Ok(found.into_iter().collect());
        }

        lyra_storage::playlists::list(&self.pool, owner.id)
            .await
            .map_err(db_err)
    }

    async fn create(&self, identity: &Identity, input: PlaylistInput) -> OpResult<Playlist> {
        let owner = resolve_owner(&self.pool, identity).await?;

        let Some(name) = input.name else {
            return Err(OpReject::new("Playlist name not provided"));
        };

        let existing = lyra_storage::playlists::find_by_exact_name(&self.pool, &name, owner.id)
            .await
            .map_err(db_err)?;
        if existing.is_some() {
            return Err(OpReject::new(
                "Playlist with similar configuration already exists",
            ));
        }

        lyra_storage::playlists::create(
            &self.pool,
            owner.id,
            &name,
            input.is_shuffled.unwrap_or(false),
        )
        .await
        .map_err(db_err)
    }

    async fn update(&self, identity: &Identity, input: PlaylistInput) -> OpResult<Playlist> {
        let owner = resolve_owner(&self.pool, identity).await?;

        let Some(id) = input.id else {
            return Err(OpReject::new("Playlist ID not provided"));
        };

        let Some(mut playlist) = lyra_storage::playlists::get_by_id(&self.pool, id, owner.id)
            .await
            .map_err(db_err)?
        else {
            return Err(OpReject::new(format!(
                "Playlist with ID {id} not found or you don't have permission to edit it"
            )));
        };

        if let Some(name) = input.name {
            playlist.name = name;
        }
        if let Some(is_shuffled) = input.is_shuffled {
            playlist.is_shuffled = is_shuffled;
        }

        let updated =
            lyra_storage::playlists::update(&self.pool, &playlist, input.songs.as_deref())
                .await
                .map_err(db_err)?;
        if !updated {
            return Err(OpReject::new(format!(
                "Playlist with ID {id} not found or you don't have permission to edit it"
            )));
        }

        playlist.songs = Some(
            lyra_storage::playlists::songs_of(&self.pool, id)
                .await
                .map_err(db_err)?,
        );

        Ok(playlist)
    }

    async fn delete(&self, identity: &Identity, input: PlaylistInput) -> OpResult<Playlist> {
        let owner = resolve_owner(&self.pool, identity).await?;

        let Some(id) = input.id else {
            return Err(OpReject::new("Playlist ID not provided"));
        };

        let Some(playlist) = lyra_storage::playlists::get_by_id(&self.pool, id, owner.id)
            .await
            .map_err(db_err)?
        else {
            return Err(OpReject::new(format!(
                "Playlist with ID {id} not found or you don't have permission to delete it"
            )));
        };

        if !lyra_storage::playlists::delete(&self.pool, id, owner.id)
            .await
            .map_err(db_err)?
        {
            return Err(OpReject::new(format!(
                "Playlist with ID {id} not found or you don't have permission to delete it"
            )));
        }

        Ok(playlist)
    }
}
