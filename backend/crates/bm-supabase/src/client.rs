use crate::{BackendError, Result};

use std::time::Duration;

use bm_config::SupabaseConfig;
use log::debug;
use reqwest::{Client as ReqwestClient, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

/// Keys checked, in order, for a human-readable message in an error body.
const ERROR_MESSAGE_KEYS: [&str; 4] = ["msg", "error_description", "message", "error"];

/// Shared HTTP plumbing for the auth and data clients.
///
/// Every request carries `apikey` and a bearer token: the user's access token
/// when one is given, otherwise the anon key.
#[derive(Clone, Debug)]
pub struct BackendClient {
    base_url: Url,
    anon_key: String,
    http: ReqwestClient,
}

impl BackendClient {
    /// # Arguments
    /// * `base_url` - Project URL (e.g., "https://abcd.supabase.co")
    /// * `anon_key` - Public anon key
    /// * `timeout` - Per-request timeout
    pub fn new(base_url: &str, anon_key: &str, timeout: Duration) -> Result<Self> {
        // Trailing slash so joins append instead of replacing the last segment.
        let normalized = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalized)
            .map_err(|e| BackendError::url(format!("{base_url}: {e}")))?;

        let http = ReqwestClient::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url,
            anon_key: anon_key.to_string(),
            http,
        })
    }

    pub fn from_config(config: &SupabaseConfig) -> Result<Self> {
        Self::new(
            &config.url,
            &config.anon_key,
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn anon_key(&self) -> &str {
        &self.anon_key
    }

    /// Absolute URL for `path` (relative to the project URL) with query pairs.
    pub(crate) fn endpoint(&self, path: &str, query: &[(&str, &str)]) -> Result<Url> {
        let mut url = self
            .base_url
            .join(path)
            .map_err(|e| BackendError::url(format!("{path}: {e}")))?;

        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }

        Ok(url)
    }

    pub(crate) fn request(
        &self,
        method: Method,
        url: Url,
        access_token: Option<&str>,
    ) -> RequestBuilder {
        let bearer = access_token.unwrap_or(&self.anon_key);
        self.http
            .request(method, url)
            .header("apikey", &self.anon_key)
            .header("Authorization", format!("Bearer {bearer}"))
    }

    /// Send and decode a JSON body, mapping non-2xx responses to `BackendError::Api`.
    pub(crate) async fn execute<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<T> {
        let body = self.send(req).await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Send and discard the body.
    pub(crate) async fn execute_empty(&self, req: RequestBuilder) -> Result<()> {
        self.send(req).await.map(|_| ())
    }

    async fn send(&self, req: RequestBuilder) -> Result<String> {
        let response = req.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            debug!("backend answered {status}: {body}");
            let message = error_message(&body).unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("Unknown error")
                    .to_string()
            });
            return Err(BackendError::api(status.as_u16(), message));
        }

        Ok(body)
    }
}

/// First non-empty string among the known error keys.
pub(crate) fn error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    ERROR_MESSAGE_KEYS.iter().find_map(|key| {
        value
            .get(key)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(String::from)
    })
}
