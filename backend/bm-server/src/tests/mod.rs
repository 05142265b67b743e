mod page_error;
mod session_store;

use bm_core::{AuthSession, Bookmark, User};

use chrono::{Duration, TimeZone, Utc};
use uuid::Uuid;

pub(crate) fn user(email: &str) -> User {
    User {
        id: Uuid::new_v4(),
        email: email.to_string(),
        name: User::name_from_email(email),
        avatar: String::new(),
    }
}

pub(crate) fn auth_session(email: &str) -> AuthSession {
    AuthSession {
        access_token: format!("access-{email}"),
        refresh_token: format!("refresh-{email}"),
        expires_at: Utc::now() + Duration::hours(1),
        user: user(email),
    }
}

pub(crate) fn bookmark(title: &str, url: &str) -> Bookmark {
    Bookmark {
        id: Uuid::new_v4(),
        title: title.to_string(),
        url: url.to_string(),
        user_id: Uuid::new_v4(),
        created_at: Utc.with_ymd_and_hms(2026, 10, 18, 9, 30, 0).unwrap(),
    }
}
