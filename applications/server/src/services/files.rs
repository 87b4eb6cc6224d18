/// Audio file CRUD service
///
/// Owns both halves of a stored file: the blob on disk (through the media
/// store) and the reference row (through the storage slice). Deleting here is
/// the only path that releases blobs.
use crate::services::{db_err, resolve_owner, MediaStore};
use async_trait::async_trait;
use lyra_core::types::{AudioFile, AudioFileInput};
use lyra_core::{CrudService, Identity, OpReject, OpResult};
use sqlx::SqlitePool;
use std::sync::Arc;

pub struct FileService {
    pool: SqlitePool,
    media_store: Arc<MediaStore>,
}

impl FileService {
    pub fn new(pool: SqlitePool, media_store: Arc<MediaStore>) -> Self {
        Self { pool, media_store }
    }
}

#[async_trait]
impl CrudService for FileService {
    type Input = AudioFileInput;
    type Entity = AudioFile;

    async fn get_one(&self, identity: &Identity, input: AudioFileInput) -> OpResult<AudioFile> {
        let owner = resolve_owner(&self.pool, identity).await?;

        let Some(id) = input.id else {
            return Err(OpReject::new("File ID not provided"));
        };

        lyra_storage::files::get_by_id(&self.pool, id, owner.id)
            .await
            .map_err(db_err)?
            .ok_or_else(|| OpReject::new(format!("File with ID: {id} not found or not accessible")))
    }

    async fn get_many(
        &self,
        identity: &Identity,
        filter: Option<AudioFileInput>,
    ) -> OpResult<Vec<AudioFile>> {
        let owner = resolve_owner(&self.pool, identity).await?;

        lyra_storage::files::list(&self.pool, owner.id, filter.and_then(|f| f.song_id))
            .await
            .map_err(db_err)
    }

    async fn create(&self, identity: &Identity, input: AudioFileInput) -> OpResult<AudioFile> {
        let owner = resolve_owner(&self.pool, identity).await?;

        let Some(data) = input.data else {
            return Err(OpReject::new("File data not provided"));
        };
        let Some(song_id) = input.song_id else {
            return Err(OpReject::new("Song ID not provided"));
        };
        let Some(file_name) = input.file_name else {
            return Err(OpReject::new("File name not provided"));
        };

        // Refuse before touching the disk when the song is foreign
        if lyra_storage::songs::get_by_id(&self.pool, song_id, owner.id)
            .await
            .map_err(db_err)?
            .is_none()
        {
            return Err(OpReject::new(format!(
                "Song with ID: {song_id} not found"
            )));
        }

        let rel_path = MediaStore::blob_path(owner.id, &file_name);
        if self.media_store.store(&rel_path, &data).await.is_err() {
            return Err(OpReject::new("File creation failed"));
        }

        let created = lyra_storage::files::create(&self.pool, owner.id, song_id, &rel_path)
            .await
            .map_err(db_err)?;

        match created {
            Some(file) => Ok(file),
            None => {
                // Song vanished between the check and the insert; drop the blob
                let _ = self.media_store.remove(&rel_path).await;
                Err(OpReject::new("File creation failed"))
            }
        }
    }

    async fn update(&self, _identity: &Identity, _input: AudioFileInput) -> OpResult<AudioFile> {
        Err(OpReject::new("Not supported"))
    }

    async fn delete(&self, identity: &Identity, input: AudioFileInput) -> OpResult<AudioFile> {
        let owner = resolve_owner(&self.pool, identity).await?;

        let Some(id) = input.id else {
            return Err(OpReject::new("File ID not provided"));
        };

        let Some(file) = lyra_storage::files::get_by_id(&self.pool, id, owner.id)
            .await
            .map_err(db_err)?
        else {
            return Err(OpReject::new(format!(
                "File with ID: {id} not found or not accessible"
            )));
        };

        if self.media_store.remove(&file.path).await.is_err() {
            return Err(OpReject::new("File deletion failed"));
        }

        if !lyra_storage::files::delete(&self.pool, id, owner.id)
            .await
            .map_err(db_err)?
        {
            return Err(OpReject::new(format!(
                "File with ID: {id} not found or not accessible"
            )));
        }

        Ok(file)
    }
}
