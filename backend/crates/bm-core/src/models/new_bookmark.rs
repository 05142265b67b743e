use crate::ValidBookmark;

use serde::Serialize;
use uuid::Uuid;

/// Insert payload for the data service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewBookmark {
    pub title: String,
    pub url: String,
    pub user_id: Uuid,
}

impl NewBookmark {
    pub fn new(valid: ValidBookmark, user_id: Uuid) -> Self {
        Self {
            title: valid.title,
            url: valid.url,
            user_id,
        }
    }
}
