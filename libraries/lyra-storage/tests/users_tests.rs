//! Integration tests for the users vertical slice

mod test_helpers;

use test_helpers::*;

#[tokio::test]
async fn test_username_is_unique() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    create_test_user(pool, "alice").await;
    let duplicate = lyra_storage::users::create(pool, "alice", "other@example.com").await;
    assert!(duplicate.is_err());
}

#[tokio::test]
async fn test_credentials_upsert_replaces_hash() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let user = create_test_user(pool, "alice").await;

    lyra_storage::users::set_password_hash(pool, user.id, "hash-v1")
        .await
        .unwrap();
    lyra_storage::users::set_password_hash(pool, user.id, "hash-v2")
        .await
        .unwrap();

    let hash = lyra_storage::users::get_password_hash(pool, user.id)
        .await
        .unwrap();
    assert_eq!(hash.as_deref(), Some("hash-v2"));
}

#[tokio::test]
async fn test_update_email() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let user = create_test_user(pool, "alice").await;
    lyra_storage::users::update_email(pool, user.id, "new@example.com")
        .await
        .unwrap();

    let reloaded = lyra_storage::users::find_by_id(pool, user.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(reloaded.email, "new@example.com");
}
