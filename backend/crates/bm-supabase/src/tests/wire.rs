use crate::auth::wire::{TokenResponse, WireUser};

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde_json::json;
use uuid::Uuid;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 18, 9, 0, 0).unwrap()
}

#[test]
fn given_metadata_with_full_name_and_avatar_when_into_user_then_used() {
    // Given
    let wire: WireUser = serde_json::from_value(json!({
        "id": Uuid::nil(),
        "email": "ada@example.com",
        "user_metadata": {"full_name": "Ada Lovelace", "avatar_url": "https://img.example/ada.png"}
    }))
    .unwrap();

    // When
    let user = wire.into_user();

    // Then
    assert_eq!(user.name, "Ada Lovelace");
    assert_eq!(user.avatar, "https://img.example/ada.png");
}

#[test]
fn given_no_metadata_when_into_user_then_name_from_email() {
    // Given
    let wire: WireUser = serde_json::from_value(json!({
        "id": Uuid::nil(),
        "email": "grace@example.com"
    }))
    .unwrap();

    // When
    let user = wire.into_user();

    // Then
    assert_eq!(user.name, "grace");
    assert!(!user.has_avatar());
}

#[test]
fn given_expires_at_when_into_session_then_absolute_expiry() {
    // Given
    let token: TokenResponse = serde_json::from_value(json!({
        "access_token": "a",
        "refresh_token": "r",
        "expires_in": 3600,
        "expires_at": now().timestamp() + 60,
        "user": {"id": Uuid::nil(), "email": "a@example.com"}
    }))
    .unwrap();

    // When
    let session = token.into_session(now());

    // Then
    assert_eq!(session.expires_at, now() + Duration::seconds(60));
}

#[test]
fn given_only_expires_in_when_into_session_then_relative_expiry() {
    // Given
    let token: TokenResponse = serde_json::from_value(json!({
        "access_token": "a",
        "expires_in": 120,
        "user": {"id": Uuid::nil()}
    }))
    .unwrap();

    // When
    let session = token.into_session(now());

    // Then
    assert_eq!(session.expires_at, now() + Duration::seconds(120));
    assert!(!session.has_refresh_token());
}
