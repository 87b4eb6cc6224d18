//! Integration tests for the playlists vertical slice
//!
//! Covers owner scoping, the full-replacement association law, ordering by
//! position with insertion-order tie breaks, and transaction rollback when a
//! submitted song fails the ownership check.

mod test_helpers;

use lyra_core::types::PlaylistEntryInput;
use test_helpers::*;

#[tokio::test]
async fn test_create_and_get_playlist() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let user = create_test_user(pool, "alice").await;

    let playlist = lyra_storage::playlists::create(pool, user.id, "Morning", true)
        .await
        .expect("Failed to create playlist");

    assert_eq!(playlist.name, "Morning");
    assert!(playlist.is_shuffled);
    assert_eq!(playlist.songs.as_deref(), Some(&[][..]));

    let retrieved = lyra_storage::playlists::get_by_id(pool, playlist.id, user.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(retrieved.name, "Morning");
}

#[tokio::test]
async fn test_update_replaces_entire_association_set() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let user = create_test_user(pool, "alice").await;
    let song5 = create_test_song(pool, user.id, "Five").await;
    let song7 = create_test_song(pool, user.id, "Seven").await;
    let song9 = create_test_song(pool, user.id, "Nine").await;

    let playlist_id = create_test_playlist(pool, user.id, "Mix").await;
    let mut playlist = lyra_storage::playlists::get_by_id(pool, playlist_id, user.id)
        .await
        .unwrap()
        .unwrap();

    // Seed with all three
    let initial = vec![
        PlaylistEntryInput { song_id: song5, position: 1 },
        PlaylistEntryInput { song_id: song7, position: 2 },
        PlaylistEntryInput { song_id: song9, position: 3 },
    ];
    assert!(lyra_storage::playlists::update(pool, &playlist, Some(&initial))
        .await
        .unwrap());

    // Resubmit only two, swapped order; the third must vanish
    playlist.name = "Mix v2".to_string();
    let replacement = vec![
        PlaylistEntryInput { song_id: song5, position: 2 },
        PlaylistEntryInput { song_id: song7, position: 1 },
    ];
    assert!(lyra_storage::playlists::update(pool, &playlist, Some(&replacement))
        .await
        .unwrap());

    let entries = lyra_storage::playlists::songs_of(pool, playlist_id).await.unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].song_id, song7);
    assert_eq!(entries[0].position, 1);
    assert_eq!(entries[1].song_id, song5);
    assert!(!entries.iter().any(|e| e.song_id == song9));

    let renamed = lyra_storage::playlists::get_by_id(pool, playlist_id, user.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(renamed.name, "Mix v2");
}

#[tokio::test]
async fn test_update_without_entries_leaves_associations_alone() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let user = create_test_user(pool, "alice").await;
    let song = create_test_song(pool, user.id, "Keeper").await;
    let playlist_id = create_test_playlist(pool, user.id, "Stable").await;

    let mut playlist = lyra_storage::playlists::get_by_id(pool, playlist_id, user.id)
        .await
        .unwrap()
        .unwrap();
    let entries = vec![PlaylistEntryInput { song_id: song, position: 1 }];
    lyra_storage::playlists::update(pool, &playlist, Some(&entries))
        .await
        .unwrap();

    playlist.name = "Stable v2".to_string();
    lyra_storage::playlists::update(pool, &playlist, None)
        .await
        .unwrap();

    let kept = lyra_storage::playlists::songs_of(pool, playlist_id).await.unwrap();
    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0].song_id, song);
}

#[tokio::test]
async fn test_foreign_song_aborts_replacement() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let alice = create_test_user(pool, "alice").await;
    let bob = create_test_user(pool, "bob").await;

    let own_song = create_test_song(pool, alice.id, "Mine").await;
    let foreign_song = create_test_song(pool, bob.id, "Theirs").await;

    let playlist_id = create_test_playlist(pool, alice.id, "Mix").await;
    let playlist = lyra_storage::playlists::get_by_id(pool, playlist_id, alice.id)
        .await
        .unwrap()
        .unwrap();

    let seed = vec![PlaylistEntryInput { song_id: own_song, position: 1 }];
    lyra_storage::playlists::update(pool, &playlist, Some(&seed))
        .await
        .unwrap();

    // One good id does not save a batch containing a foreign one
    let bad = vec![
        PlaylistEntryInput { song_id: own_song, position: 1 },
        PlaylistEntryInput { song_id: foreign_song, position: 2 },
    ];
    let err = lyra_storage::playlists::update(pool, &playlist, Some(&bad)).await;
    assert!(err.is_err());

    // The previous set survived the rollback
    let entries = lyra_storage::playlists::songs_of(pool, playlist_id).await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].song_id, own_song);
}

#[tokio::test]
async fn test_position_ties_keep_submission_order() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let user = create_test_user(pool, "alice").await;
    let first = create_test_song(pool, user.id, "First").await;
    let second = create_test_song(pool, user.id, "Second").await;
    let playlist_id = create_test_playlist(pool, user.id, "Ties").await;

    let playlist = lyra_storage::playlists::get_by_id(pool, playlist_id, user.id)
        .await
        .unwrap()
        .unwrap();
    let entries = vec![
        PlaylistEntryInput { song_id: second, position: 1 },
        PlaylistEntryInput { song_id: first, position: 1 },
    ];
    lyra_storage::playlists::update(pool, &playlist, Some(&entries))
        .await
        .unwrap();

    let stored = lyra_storage::playlists::songs_of(pool, playlist_id).await.unwrap();
    assert_eq!(stored[0].song_id, second);
    assert_eq!(stored[1].song_id, first);
}

#[tokio::test]
async fn test_playlists_are_invisible_across_owners() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let alice = create_test_user(pool, "alice").await;
    let bob = create_test_user(pool, "bob").await;

    let playlist_id = create_test_playlist(pool, alice.id, "Secret").await;

    assert!(lyra_storage::playlists::get_by_id(pool, playlist_id, bob.id)
        .await
        .unwrap()
        .is_none());
    assert!(!lyra_storage::playlists::delete(pool, playlist_id, bob.id)
        .await
        .unwrap());
}

#[tokio::test]
async fn test_delete_cascades_association_rows() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let user = create_test_user(pool, "alice").await;
    let song = create_test_song(pool, user.id, "Tune").await;
    let playlist_id = create_test_playlist(pool, user.id, "Gone Soon").await;

    let playlist = lyra_storage::playlists::get_by_id(pool, playlist_id, user.id)
        .await
        .unwrap()
        .unwrap();
    let entries = vec![PlaylistEntryInput { song_id: song, position: 1 }];
    lyra_storage::playlists::update(pool, &playlist, Some(&entries))
        .await
        .unwrap();

    assert!(lyra_storage::playlists::delete(pool, playlist_id, user.id)
        .await
        .unwrap());

    // The song itself is untouched
    assert!(lyra_storage::songs::get_by_id(pool, song, user.id)
        .await
        .unwrap()
        .is_some());
    assert!(lyra_storage::playlists::songs_of(pool, playlist_id)
        .await
        .unwrap()
        .is_empty());
}
