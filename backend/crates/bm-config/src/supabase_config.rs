use crate::{ConfigError, ConfigErrorResult};

use serde::Deserialize;
use url::Url;

pub const DEFAULT_TABLE: &str = "bookmarks";

pub const MIN_REQUEST_TIMEOUT_SECS: u64 = 1;
pub const MAX_REQUEST_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Hosted backend (auth + data + realtime) connection settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SupabaseConfig {
    /// Project URL, e.g. "https://abcd.supabase.co"
    pub url: String,
    /// Public anon key. Never logged.
    pub anon_key: String,
    /// Table holding bookmark rows
    pub table: String,
    pub request_timeout_secs: u64,
}

impl Default for SupabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            anon_key: String::new(),
            table: String::from(DEFAULT_TABLE),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl SupabaseConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.url.trim().is_empty() {
            return Err(ConfigError::backend(
                "supabase.url is required (or set BM_SUPABASE_URL)",
            ));
        }

        let parsed = Url::parse(&self.url).map_err(|e| {
            ConfigError::backend(format!("supabase.url is not a valid URL: {e}"))
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::backend(format!(
                "supabase.url must use http or https, got {}",
                parsed.scheme()
            )));
        }

        if self.anon_key.trim().is_empty() {
            return Err(ConfigError::backend(
                "supabase.anon_key is required (or set BM_SUPABASE_ANON_KEY)",
            ));
        }

        if self.table.trim().is_empty()
            || !self
                .table
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            return Err(ConfigError::backend(format!(
                "supabase.table must be a plain identifier, got '{}'",
                self.table
            )));
        }

        if self.request_timeout_secs < MIN_REQUEST_TIMEOUT_SECS
            || self.request_timeout_secs > MAX_REQUEST_TIMEOUT_SECS
        {
            return Err(ConfigError::backend(format!(
                "supabase.request_timeout_secs must be {}-{}, got {}",
                MIN_REQUEST_TIMEOUT_SECS, MAX_REQUEST_TIMEOUT_SECS, self.request_timeout_secs
            )));
        }

        Ok(())
    }
}
