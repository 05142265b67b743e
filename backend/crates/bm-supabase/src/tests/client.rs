use crate::BackendClient;
use crate::client::error_message;
use crate::error::{BackendError, UNREACHABLE_MESSAGE};

use std::time::Duration;

use googletest::assert_that;
use googletest::prelude::{anything, eq, err};

fn client(base: &str) -> BackendClient {
    BackendClient::new(base, "anon", Duration::from_secs(5)).unwrap()
}

#[test]
fn given_base_with_path_when_endpoint_then_path_is_appended() {
    // Given
    let client = client("http://localhost:54321/project");

    // When
    let url = client.endpoint("auth/v1/token", &[("grant_type", "password")]).unwrap();

    // Then
    assert_eq!(
        url.as_str(),
        "http://localhost:54321/project/auth/v1/token?grant_type=password"
    );
}

#[test]
fn given_trailing_slash_when_new_then_single_slash_kept() {
    // Given
    let client = client("https://abcd.supabase.co/");

    // When
    let url = client.endpoint("rest/v1/bookmarks", &[]).unwrap();

    // Then
    assert_eq!(url.as_str(), "https://abcd.supabase.co/rest/v1/bookmarks");
}

#[test]
fn given_unparseable_base_when_new_then_url_error() {
    // When
    let result = BackendClient::new("not a url", "anon", Duration::from_secs(5));

    // Then
    assert_that!(result, err(anything()));
}

#[test]
fn given_gotrue_error_body_when_error_message_then_msg_wins() {
    // Given
    let body = r#"{"code":400,"msg":"Invalid login credentials","error":"invalid_grant"}"#;

    // When / Then
    assert_eq!(
        error_message(body),
        Some(String::from("Invalid login credentials"))
    );
}

#[test]
fn given_oauth_error_body_when_error_message_then_description_before_error() {
    // Given
    let body = r#"{"error":"invalid_grant","error_description":"Refresh Token Not Found"}"#;

    // When / Then
    assert_eq!(
        error_message(body),
        Some(String::from("Refresh Token Not Found"))
    );
}

#[test]
fn given_non_json_body_when_error_message_then_none() {
    assert_eq!(error_message("<html>bad gateway</html>"), None);
}

#[test]
fn given_api_error_when_user_message_then_backend_message() {
    // Given
    let error = BackendError::api(401, "JWT expired");

    // When / Then
    assert_eq!(error.user_message(), "JWT expired");
    assert_that!(error.is_unauthorized(), eq(true));
}

#[test]
fn given_socket_error_when_user_message_then_generic_message() {
    // Given
    let error = BackendError::ws("connection reset");

    // When / Then
    assert_eq!(error.user_message(), UNREACHABLE_MESSAGE);
    assert_that!(error.is_unauthorized(), eq(false));
}
