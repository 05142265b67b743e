use crate::{BackendClient, BookmarkStore, Result};

use async_trait::async_trait;
use bm_core::{Bookmark, NewBookmark};
use log::debug;
use reqwest::Method;
use uuid::Uuid;

const REST_PREFIX: &str = "rest/v1";
/// Ask PostgREST for a single object instead of a one-element array.
const SINGLE_OBJECT: &str = "application/vnd.pgrst.object+json";

/// PostgREST client for the bookmark table under `{url}/rest/v1/{table}`.
#[derive(Clone)]
pub struct RestClient {
    client: BackendClient,
    table: String,
}

impl RestClient {
    pub fn new(client: BackendClient, table: &str) -> Self {
        Self {
            client,
            table: table.to_string(),
        }
    }

    fn table_path(&self) -> String {
        format!("{REST_PREFIX}/{}", self.table)
    }
}

fn eq(value: Uuid) -> String {
    format!("eq.{value}")
}

#[async_trait]
impl BookmarkStore for RestClient {
    async fn list(&self, access_token: &str, owner: Uuid) -> Result<Vec<Bookmark>> {
        let owner_filter = eq(owner);
        let url = self.client.endpoint(
            &self.table_path(),
            &[
                ("select", "*"),
                ("user_id", owner_filter.as_str()),
                ("order", "created_at.desc"),
            ],
        )?;
        let req = self.client.request(Method::GET, url, Some(access_token));
        let rows: Vec<Bookmark> = self.client.execute(req).await?;
        debug!("fetched {} bookmarks for {owner}", rows.len());
        Ok(rows)
    }

    async fn insert(&self, access_token: &str, bookmark: &NewBookmark) -> Result<Bookmark> {
        let url = self.client.endpoint(&self.table_path(), &[])?;
        let req = self
            .client
            .request(Method::POST, url, Some(access_token))
            .header("Prefer", "return=representation")
            .header("Accept", SINGLE_OBJECT)
            .json(bookmark);
        let row: Bookmark = self.client.execute(req).await?;
        debug!("inserted bookmark {} for {}", row.id, row.user_id);
        Ok(row)
    }

    async fn delete(&self, access_token: &str, id: Uuid, owner: Uuid) -> Result<()> {
        let id_filter = eq(id);
        let owner_filter = eq(owner);
        let url = self.client.endpoint(
            &self.table_path(),
            &[("id", id_filter.as_str()), ("user_id", owner_filter.as_str())],
        )?;
        let req = self.client.request(Method::DELETE, url, Some(access_token));
        self.client.execute_empty(req).await?;
        debug!("deleted bookmark {id} for {owner}");
        Ok(())
    }
}
