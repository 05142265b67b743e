//! Bookmark store against a mocked PostgREST server

use bm_core::NewBookmark;
use bm_supabase::{BackendClient, BookmarkStore, RestClient};

use std::time::Duration;

use serde_json::json;
use uuid::Uuid;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, header, method, path, query_param},
};

fn rest_client(server: &MockServer) -> RestClient {
    let client = BackendClient::new(&server.uri(), "anon-key", Duration::from_secs(5)).unwrap();
    RestClient::new(client, "bookmarks")
}

#[tokio::test]
async fn given_owner_when_list_then_filtered_newest_first_query() {
    // Given
    let server = MockServer::start().await;
    let owner = Uuid::new_v4();
    let newer = Uuid::new_v4();
    let older = Uuid::new_v4();
    Mock::given(method("GET"))
        .and(path("/rest/v1/bookmarks"))
        .and(query_param("select", "*"))
        .and(query_param("user_id", format!("eq.{owner}")))
        .and(query_param("order", "created_at.desc"))
        .and(header("Authorization", "Bearer access-1"))
        .and(header("apikey", "anon-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": newer, "title": "B", "url": "https://b.example", "user_id": owner,
             "created_at": "2026-10-18T10:00:00+00:00"},
            {"id": older, "title": "A", "url": "https://a.example", "user_id": owner,
             "created_at": "2026-10-18T09:00:00+00:00"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    // When
    let rows = rest_client(&server).list("access-1", owner).await.unwrap();

    // Then
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].id, newer);
    assert_eq!(rows[1].id, older);
}

#[tokio::test]
async fn given_new_bookmark_when_insert_then_single_representation_requested() {
    // Given
    let server = MockServer::start().await;
    let owner = Uuid::new_v4();
    let id = Uuid::new_v4();
    Mock::given(method("POST"))
        .and(path("/rest/v1/bookmarks"))
        .and(header("Prefer", "return=representation"))
        .and(header("Accept", "application/vnd.pgrst.object+json"))
        .and(body_json(json!({
            "title": "Rust",
            "url": "https://rust-lang.org",
            "user_id": owner
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": id, "title": "Rust", "url": "https://rust-lang.org", "user_id": owner,
            "created_at": "2026-10-18T09:00:00.5+00:00"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let new_bookmark = NewBookmark {
        title: String::from("Rust"),
        url: String::from("https://rust-lang.org"),
        user_id: owner,
    };

    // When
    let row = rest_client(&server)
        .insert("access-1", &new_bookmark)
        .await
        .unwrap();

    // Then
    assert_eq!(row.id, id);
    assert_eq!(row.user_id, owner);
}

#[tokio::test]
async fn given_policy_violation_when_insert_then_message_surfaces() {
    // Given
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/rest/v1/bookmarks"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "code": "42501",
            "details": null,
            "hint": null,
            "message": "new row violates row-level security policy for table \"bookmarks\""
        })))
        .mount(&server)
        .await;

    let new_bookmark = NewBookmark {
        title: String::from("x"),
        url: String::from("https://x.example"),
        user_id: Uuid::new_v4(),
    };

    // When
    let err = rest_client(&server)
        .insert("access-1", &new_bookmark)
        .await
        .unwrap_err();

    // Then
    assert!(err.user_message().contains("row-level security"));
}

#[tokio::test]
async fn given_id_and_owner_when_delete_then_both_filters_sent() {
    // Given
    let server = MockServer::start().await;
    let owner = Uuid::new_v4();
    let id = Uuid::new_v4();
    Mock::given(method("DELETE"))
        .and(path("/rest/v1/bookmarks"))
        .and(query_param("id", format!("eq.{id}")))
        .and(query_param("user_id", format!("eq.{owner}")))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    // When
    let result = rest_client(&server).delete("access-1", id, owner).await;

    // Then
    assert!(result.is_ok());
}

#[tokio::test]
async fn given_server_error_without_body_when_delete_then_status_reason() {
    // Given
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/rest/v1/bookmarks"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    // When
    let err = rest_client(&server)
        .delete("access-1", Uuid::new_v4(), Uuid::new_v4())
        .await
        .unwrap_err();

    // Then
    assert_eq!(err.user_message(), "Service Unavailable");
}
