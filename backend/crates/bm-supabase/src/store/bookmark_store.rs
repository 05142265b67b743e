use crate::Result;

use async_trait::async_trait;
use bm_core::{Bookmark, NewBookmark};
use uuid::Uuid;

/// Persistent bookmark rows, scoped to their owner.
#[async_trait]
pub trait BookmarkStore: Send + Sync {
    /// All of `owner`'s bookmarks, newest first.
    async fn list(&self, access_token: &str, owner: Uuid) -> Result<Vec<Bookmark>>;

    /// Insert and return the row as stored (server-assigned id and timestamp).
    async fn insert(&self, access_token: &str, bookmark: &NewBookmark) -> Result<Bookmark>;

    async fn delete(&self, access_token: &str, id: Uuid, owner: Uuid) -> Result<()>;
}
