//! Integration tests for the chats and messages vertical slices
//!
//! Covers the seeded welcome message, the atomic conversation turn with its
//! audit row, and the authorship gates on message mutation.

mod test_helpers;

use lyra_storage::chats::SEED_TEXT;
use test_helpers::*;

#[tokio::test]
async fn test_new_chat_is_seeded_with_assistant_welcome() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let user = create_test_user(pool, "alice").await;
    let assistant_id = lyra_storage::users::ensure_reserved(pool, "ChatGPT")
        .await
        .unwrap();

    let chat = lyra_storage::chats::create(pool, user.id, "First chat", assistant_id)
        .await
        .expect("Failed to create chat");

    let messages = chat.messages.expect("seed message is returned");
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].text, SEED_TEXT);
    assert_eq!(messages[0].user_id, assistant_id);

    // And it is actually persisted, not just echoed
    let reloaded = lyra_storage::chats::get_with_messages(pool, chat.id, user.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(reloaded.messages.unwrap().len(), 1);
}

#[tokio::test]
async fn test_chats_are_invisible_across_owners() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let alice = create_test_user(pool, "alice").await;
    let bob = create_test_user(pool, "bob").await;
    let assistant_id = lyra_storage::users::ensure_reserved(pool, "ChatGPT")
        .await
        .unwrap();

    let chat_id = create_test_chat(pool, alice.id, assistant_id, "Private").await;

    assert!(lyra_storage::chats::get_by_id(pool, chat_id, bob.id)
        .await
        .unwrap()
        .is_none());
    assert!(!lyra_storage::chats::update(pool, chat_id, bob.id, "Renamed")
        .await
        .unwrap());
    assert!(!lyra_storage::chats::delete(pool, chat_id, bob.id).await.unwrap());
}

#[tokio::test]
async fn test_record_turn_writes_three_rows_atomically() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let user = create_test_user(pool, "alice").await;
    let assistant_id = lyra_storage::users::ensure_reserved(pool, "ChatGPT")
        .await
        .unwrap();
    let chat_id = create_test_chat(pool, user.id, assistant_id, "Chat").await;

    let raw = "```json\n{\"type\":\"question\",\"textResponse\":\"Sure.\"}\n```";
    let (user_msg, assistant_msg) = lyra_storage::messages::record_turn(
        pool,
        chat_id,
        user.id,
        "play something",
        &lyra_storage::now_utc(),
        assistant_id,
        "Sure.",
        raw,
    )
    .await
    .expect("Failed to record turn");

    assert_eq!(user_msg.user_id, user.id);
    assert_eq!(assistant_msg.user_id, assistant_id);
    assert!(user_msg.id < assistant_msg.id);

    // Seed + user + assistant
    let messages = lyra_storage::messages::list_for_chat(pool, chat_id).await.unwrap();
    assert_eq!(messages.len(), 3);
    assert_eq!(messages[1].text, "play something");
    assert_eq!(messages[2].text, "Sure.");

    // Raw reply landed in the audit trail
    let audit_rows = lyra_storage::audit::count_for_chat(pool, chat_id).await.unwrap();
    assert_eq!(audit_rows, 1);
}

#[tokio::test]
async fn test_record_turn_rolls_back_on_missing_chat() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let user = create_test_user(pool, "alice").await;
    let assistant_id = lyra_storage::users::ensure_reserved(pool, "ChatGPT")
        .await
        .unwrap();

    // chat 999 does not exist; the FK rejects the first insert
    let result = lyra_storage::messages::record_turn(
        pool, 999, user.id, "hello", &lyra_storage::now_utc(), assistant_id, "hi", "raw",
    )
    .await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_record_turn_keeps_caller_supplied_user_timestamp() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let user = create_test_user(pool, "alice").await;
    let assistant_id = lyra_storage::users::ensure_reserved(pool, "ChatGPT")
        .await
        .unwrap();
    let chat_id = create_test_chat(pool, user.id, assistant_id, "Chat").await;

    // The caller stamps the user message before the assistant round trip;
    // that stamp must land in the row untouched.
    let user_at = "2026-01-01T00:00:00+00:00";
    let (user_msg, assistant_msg) = lyra_storage::messages::record_turn(
        pool, chat_id, user.id, "hello", user_at, assistant_id, "hi", "raw",
    )
    .await
    .unwrap();

    assert_eq!(user_msg.created_at, user_at);
    assert!(assistant_msg.created_at > user_msg.created_at);

    let stored = lyra_storage::messages::get_by_id(pool, user_msg.id, user.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.created_at, user_at);
}

#[tokio::test]
async fn test_message_mutation_requires_authorship() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let user = create_test_user(pool, "alice").await;
    let assistant_id = lyra_storage::users::ensure_reserved(pool, "ChatGPT")
        .await
        .unwrap();
    let chat_id = create_test_chat(pool, user.id, assistant_id, "Chat").await;

    let (user_msg, assistant_msg) = lyra_storage::messages::record_turn(
        pool, chat_id, user.id, "original", &lyra_storage::now_utc(), assistant_id, "reply", "raw",
    )
    .await
    .unwrap();

    // Own message: editable and deletable
    assert!(lyra_storage::messages::update(pool, user_msg.id, user.id, "edited")
        .await
        .unwrap());
    let edited = lyra_storage::messages::get_by_id(pool, user_msg.id, user.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(edited.text, "edited");

    // Assistant message: visible but not mutable by the chat owner
    assert!(lyra_storage::messages::get_by_id(pool, assistant_msg.id, user.id)
        .await
        .unwrap()
        .is_some());
    assert!(!lyra_storage::messages::update(pool, assistant_msg.id, user.id, "forged")
        .await
        .unwrap());
    assert!(!lyra_storage::messages::delete(pool, assistant_msg.id, user.id)
        .await
        .unwrap());
}

#[tokio::test]
async fn test_deleting_chat_cascades_messages() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let user = create_test_user(pool, "alice").await;
    let assistant_id = lyra_storage::users::ensure_reserved(pool, "ChatGPT")
        .await
        .unwrap();
    let chat_id = create_test_chat(pool, user.id, assistant_id, "Gone").await;

    lyra_storage::messages::record_turn(
        pool, chat_id, user.id, "hello", &lyra_storage::now_utc(), assistant_id, "hi", "raw",
    )
    .await
    .unwrap();

    assert!(lyra_storage::chats::delete(pool, chat_id, user.id).await.unwrap());
    assert!(lyra_storage::messages::list_for_chat(pool, chat_id)
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_ensure_reserved_is_idempotent() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let first = lyra_storage::users::ensure_reserved(pool, "ChatGPT").await.unwrap();
    let second = lyra_storage::users::ensure_reserved(pool, "ChatGPT").await.unwrap();
    assert_eq!(first, second);

    // The reserved account has no credentials
    let hash = lyra_storage::users::get_password_hash(pool, first).await.unwrap();
    assert!(hash.is_none());
}
