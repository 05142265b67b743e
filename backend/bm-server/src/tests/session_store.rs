use crate::session::{SessionId, SessionStore};
use crate::tests::auth_session;

use std::time::Duration;

use chrono::Utc;
use googletest::assert_that;
use googletest::prelude::eq;

#[test]
fn given_two_new_ids_when_compared_then_distinct_and_long() {
    let a = SessionId::new();
    let b = SessionId::new();

    assert_ne!(a, b);
    assert_that!(a.as_str().len(), eq(64));
}

#[test]
fn given_session_id_when_displayed_then_truncated() {
    let id = SessionId::from("0123456789abcdef");

    assert_eq!(id.to_string(), "01234567…");
}

#[tokio::test]
async fn given_inserted_session_when_fetched_then_returned() {
    // Given
    let store = SessionStore::new();
    let id = SessionId::new();
    let session = auth_session("ada@example.com");

    // When
    store.insert(id.clone(), session.clone()).await;

    // Then
    assert_eq!(store.get(&id).await, Some(session));
    assert_that!(store.len().await, eq(1));
}

#[tokio::test]
async fn given_removed_session_when_replaced_then_not_recreated() {
    // Given
    let store = SessionStore::new();
    let id = SessionId::new();
    store.insert(id.clone(), auth_session("ada@example.com")).await;
    assert!(store.remove(&id).await.is_some());

    // When
    store.replace(&id, auth_session("ada@example.com")).await;

    // Then
    assert!(store.get(&id).await.is_none());
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn given_existing_session_when_replaced_then_tokens_updated() {
    // Given
    let store = SessionStore::new();
    let id = SessionId::new();
    store.insert(id.clone(), auth_session("ada@example.com")).await;
    let mut refreshed = auth_session("ada@example.com");
    refreshed.access_token = String::from("rotated");

    // When
    store.replace(&id, refreshed).await;

    // Then
    let stored = store.get(&id).await.unwrap();
    assert_eq!(stored.access_token, "rotated");
}

#[tokio::test(start_paused = true)]
async fn given_session_unused_past_idle_timeout_when_swept_then_dropped() {
    // Given
    let store = SessionStore::new();
    let stale = SessionId::new();
    store.insert(stale.clone(), auth_session("ada@example.com")).await;
    tokio::time::advance(Duration::from_secs(90)).await;
    let fresh = SessionId::new();
    store.insert(fresh.clone(), auth_session("grace@example.com")).await;

    // When
    let dropped = store.sweep(Duration::from_secs(60)).await;

    // Then
    assert_that!(dropped, eq(1));
    assert!(store.get(&stale).await.is_none());
    assert!(store.get(&fresh).await.is_some());
}

#[tokio::test(start_paused = true)]
async fn given_session_revalidated_when_swept_then_idle_clock_restarted() {
    // Given
    let store = SessionStore::new();
    let id = SessionId::new();
    store.insert(id.clone(), auth_session("ada@example.com")).await;
    tokio::time::advance(Duration::from_secs(50)).await;
    store.replace(&id, auth_session("ada@example.com")).await;
    tokio::time::advance(Duration::from_secs(50)).await;

    // When
    let dropped = store.sweep(Duration::from_secs(60)).await;

    // Then
    assert_that!(dropped, eq(0));
    assert!(store.get(&id).await.is_some());
}

#[tokio::test]
async fn given_expired_session_without_refresh_token_when_swept_then_dropped() {
    // Given
    let store = SessionStore::new();
    let id = SessionId::new();
    let mut session = auth_session("ada@example.com");
    session.expires_at = Utc::now() - chrono::Duration::minutes(5);
    session.refresh_token = String::new();
    store.insert(id.clone(), session).await;

    // When
    let dropped = store.sweep(Duration::from_secs(3600)).await;

    // Then
    assert_that!(dropped, eq(1));
    assert!(store.is_empty().await);
}

#[tokio::test(start_paused = true)]
async fn given_sessions_of_owner_when_listed_then_most_recent_first() {
    // Given
    let store = SessionStore::new();
    let session = auth_session("ada@example.com");
    let owner = session.user.id;
    let older = SessionId::new();
    store.insert(older.clone(), session.clone()).await;
    tokio::time::advance(Duration::from_secs(5)).await;
    let newer = SessionId::new();
    store.insert(newer.clone(), session).await;
    store.insert(SessionId::new(), auth_session("grace@example.com")).await;

    // When
    let sessions = store.owner_sessions(owner).await;

    // Then
    assert_eq!(sessions, vec![newer, older]);
}
