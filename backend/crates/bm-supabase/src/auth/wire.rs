//! GoTrue response shapes and their mapping onto domain types.

use bm_core::{AuthSession, User};
use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

/// Used when the token response carries neither `expires_at` nor `expires_in`.
const FALLBACK_TOKEN_LIFETIME_SECS: i64 = 3600;

const NAME_KEYS: [&str; 2] = ["full_name", "name"];
const AVATAR_KEYS: [&str; 2] = ["avatar_url", "picture"];

#[derive(Debug, Deserialize)]
pub(crate) struct WireUser {
    pub id: Uuid,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub user_metadata: Option<Value>,
}

impl WireUser {
    pub(crate) fn into_user(self) -> User {
        let email = self.email.unwrap_or_default();
        let metadata = self.user_metadata.unwrap_or(Value::Null);

        let name = metadata_string(&metadata, &NAME_KEYS)
            .unwrap_or_else(|| User::name_from_email(&email));
        let avatar = metadata_string(&metadata, &AVATAR_KEYS).unwrap_or_default();

        User {
            id: self.id,
            email,
            name,
            avatar,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: String,
    #[serde(default)]
    pub expires_in: Option<i64>,
    /// Unix seconds
    #[serde(default)]
    pub expires_at: Option<i64>,
    pub user: WireUser,
}

impl TokenResponse {
    pub(crate) fn into_session(self, now: DateTime<Utc>) -> AuthSession {
        let expires_at = self
            .expires_at
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
            .unwrap_or_else(|| {
                now + Duration::seconds(self.expires_in.unwrap_or(FALLBACK_TOKEN_LIFETIME_SECS))
            });

        AuthSession {
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            expires_at,
            user: self.user.into_user(),
        }
    }
}

fn metadata_string(metadata: &Value, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| {
        metadata
            .get(key)
            .and_then(Value::as_str)
            .filter(|s| !s.trim().is_empty())
            .map(String::from)
    })
}
