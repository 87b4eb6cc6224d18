//! Integration tests for the files vertical slice
//!
//! Files carry no owner column; these tests pin the transitive authorization
//! through the parent song.

mod test_helpers;

use test_helpers::*;

#[tokio::test]
async fn test_create_refuses_foreign_song() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let alice = create_test_user(pool, "alice").await;
    let bob = create_test_user(pool, "bob").await;
    let bobs_song = create_test_song(pool, bob.id, "Not Yours").await;

    let attached = lyra_storage::files::create(pool, alice.id, bobs_song, "1/sneaky.mp3")
        .await
        .unwrap();
    assert!(attached.is_none());
}

#[tokio::test]
async fn test_list_scopes_through_song_owner_and_filters_by_song() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let alice = create_test_user(pool, "alice").await;
    let bob = create_test_user(pool, "bob").await;

    let song_a = create_test_song(pool, alice.id, "A").await;
    let song_b = create_test_song(pool, alice.id, "B").await;
    let bobs_song = create_test_song(pool, bob.id, "C").await;

    lyra_storage::files::create(pool, alice.id, song_a, "1/a.mp3")
        .await
        .unwrap();
    lyra_storage::files::create(pool, alice.id, song_b, "1/b.mp3")
        .await
        .unwrap();
    lyra_storage::files::create(pool, bob.id, bobs_song, "2/c.mp3")
        .await
        .unwrap();

    let all = lyra_storage::files::list(pool, alice.id, None).await.unwrap();
    assert_eq!(all.len(), 2);

    let only_a = lyra_storage::files::list(pool, alice.id, Some(song_a))
        .await
        .unwrap();
    assert_eq!(only_a.len(), 1);
    assert_eq!(only_a[0].path, "1/a.mp3");

    // Filtering by a foreign song yields nothing
    let foreign = lyra_storage::files::list(pool, alice.id, Some(bobs_song))
        .await
        .unwrap();
    assert!(foreign.is_empty());
}

#[tokio::test]
async fn test_delete_is_scoped_through_song_owner() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let alice = create_test_user(pool, "alice").await;
    let bob = create_test_user(pool, "bob").await;
    let song = create_test_song(pool, alice.id, "Mine").await;

    let file = lyra_storage::files::create(pool, alice.id, song, "1/mine.mp3")
        .await
        .unwrap()
        .unwrap();

    assert!(!lyra_storage::files::delete(pool, file.id, bob.id).await.unwrap());
    assert!(lyra_storage::files::delete(pool, file.id, alice.id).await.unwrap());
}
