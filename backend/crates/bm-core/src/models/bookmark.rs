//! Bookmark entity - a titled URL owned by a single user.

use crate::display;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A saved link. Created and deleted on user action, never updated in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bookmark {
    pub id: Uuid,
    pub title: String,
    pub url: String,
    /// Owner reference
    pub user_id: Uuid,
    #[serde(with = "crate::models::timestamp")]
    pub created_at: DateTime<Utc>,
}

impl Bookmark {
    /// Build a locally-synthesized row that stands in for a pending insert.
    pub fn synthesize(title: String, url: String, user_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            title,
            url,
            user_id,
            created_at: Utc::now(),
        }
    }

    pub fn display_host(&self) -> String {
        display::display_host(&self.url)
    }

    pub fn favicon_url(&self) -> Option<String> {
        display::favicon_url(&self.url)
    }

    pub fn created_on(&self) -> String {
        display::format_date(&self.created_at)
    }
}
