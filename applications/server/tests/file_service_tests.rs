//! File service integration tests
//!
//! The file service owns both halves of a stored file: the blob on disk and
//! the reference row. These tests pin that the two stay in step.

mod common;

use common::TestCtx;
use lyra_core::types::{AudioFileInput, SongInput};
use lyra_core::CrudService;
use lyra_server::services::{FileService, MediaStore, SongService};
use std::sync::Arc;

struct FileCtx {
    ctx: TestCtx,
    store: Arc<MediaStore>,
    _blob_dir: tempfile::TempDir,
}

async fn file_ctx() -> FileCtx {
    let ctx = TestCtx::new().await;
    let blob_dir = tempfile::tempdir().expect("Failed to create blob dir");
    let store = MediaStore::new(blob_dir.path().to_path_buf());
    store.initialize().await.expect("Failed to init store");

    FileCtx {
        ctx,
        store: Arc::new(store),
        _blob_dir: blob_dir,
    }
}

fn upload(song_id: i64, file_name: &str, data: &[u8]) -> AudioFileInput {
    AudioFileInput {
        id: None,
        song_id: Some(song_id),
        file_name: Some(file_name.to_string()),
        data: Some(data.to_vec()),
    }
}

#[tokio::test]
async fn test_upload_stores_blob_and_row() {
    let f = file_ctx().await;
    let alice = f.ctx.signed_up("alice").await;

    let song = SongService::new(f.ctx.pool.clone())
        .create(
            &alice,
            SongInput {
                title: Some("Naima".to_string()),
                ..SongInput::default()
            },
        )
        .await
        .unwrap();

    let service = FileService::new(f.ctx.pool.clone(), f.store.clone());
    let file = service
        .create(&alice, upload(song.id, "naima.mp3", b"audio bytes"))
        .await
        .expect("Upload failed");

    assert_eq!(file.path, format!("{}/naima.mp3", song.owner_id));
    assert!(f.store.open(&file.path).await.unwrap().is_some());

    // Delete releases both the row and the blob
    let deleted = service
        .delete(&alice, AudioFileInput::by_id(file.id))
        .await
        .expect("Delete failed");
    assert_eq!(deleted.id, file.id);
    assert!(f.store.open(&file.path).await.unwrap().is_none());
    assert!(service
        .get_many(&alice, None)
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_upload_requires_data_and_song() {
    let f = file_ctx().await;
    let alice = f.ctx.signed_up("alice").await;
    let service = FileService::new(f.ctx.pool.clone(), f.store.clone());

    let err = service
        .create(
            &alice,
            AudioFileInput {
                song_id: Some(1),
                file_name: Some("x.mp3".to_string()),
                ..AudioFileInput::default()
            },
        )
        .await
        .expect_err("Missing data must reject");
    assert_eq!(err.message, "File data not provided");

    let err = service
        .create(
            &alice,
            AudioFileInput {
                file_name: Some("x.mp3".to_string()),
                data: Some(b"bytes".to_vec()),
                ..AudioFileInput::default()
            },
        )
        .await
        .expect_err("Missing song must reject");
    assert_eq!(err.message, "Song ID not provided");
}

#[tokio::test]
async fn test_upload_to_foreign_song_is_rejected() {
    let f = file_ctx().await;
    let alice = f.ctx.signed_up("alice").await;
    let bob = f.ctx.signed_up("bob").await;

    let song = SongService::new(f.ctx.pool.clone())
        .create(
            &bob,
            SongInput {
                title: Some("Not Yours".to_string()),
                ..SongInput::default()
            },
        )
        .await
        .unwrap();

    let service = FileService::new(f.ctx.pool.clone(), f.store.clone());
    let err = service
        .create(&alice, upload(song.id, "sneaky.mp3", b"bytes"))
        .await
        .expect_err("Foreign song must reject");
    assert_eq!(err.message, format!("Song with ID: {} not found", song.id));

    // No blob was written for the rejected upload
    let alice_row = lyra_storage::users::find_by_username(&f.ctx.pool, "alice")
        .await
        .unwrap()
        .unwrap();
    let rel = MediaStore::blob_path(alice_row.id, "sneaky.mp3");
    assert!(f.store.open(&rel).await.unwrap().is_none());
}

#[tokio::test]
async fn test_update_is_not_supported() {
    let f = file_ctx().await;
    let alice = f.ctx.signed_up("alice").await;
    let service = FileService::new(f.ctx.pool.clone(), f.store.clone());

    let err = service
        .update(&alice, AudioFileInput::by_id(1))
        .await
        .expect_err("Update must reject");
    assert_eq!(err.message, "Not supported");
}
