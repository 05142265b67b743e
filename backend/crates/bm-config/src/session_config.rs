use crate::{ConfigError, ConfigErrorResult};

use std::time::Duration;

use serde::Deserialize;

pub const DEFAULT_COOKIE_NAME: &str = "bm-session";

// Unused sessions are dropped after this long (seconds)
pub const MIN_SESSION_IDLE_TIMEOUT_SECS: u64 = 60;
pub const MAX_SESSION_IDLE_TIMEOUT_SECS: u64 = 30 * 24 * 60 * 60;
pub const DEFAULT_SESSION_IDLE_TIMEOUT_SECS: u64 = 24 * 60 * 60;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub cookie_name: String,
    /// Mark the session cookie `Secure` (set when served over https)
    pub secure: bool,
    /// A session not used for this long is forgotten
    pub idle_timeout_secs: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: String::from(DEFAULT_COOKIE_NAME),
            secure: false,
            idle_timeout_secs: DEFAULT_SESSION_IDLE_TIMEOUT_SECS,
        }
    }
}

impl SessionConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        let valid = !self.cookie_name.is_empty()
            && self
                .cookie_name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(ConfigError::config(format!(
                "session.cookie_name must be non-empty [A-Za-z0-9_-], got '{}'",
                self.cookie_name
            )));
        }

        if self.idle_timeout_secs < MIN_SESSION_IDLE_TIMEOUT_SECS
            || self.idle_timeout_secs > MAX_SESSION_IDLE_TIMEOUT_SECS
        {
            return Err(ConfigError::config(format!(
                "session.idle_timeout_secs must be {}-{}, got {}",
                MIN_SESSION_IDLE_TIMEOUT_SECS, MAX_SESSION_IDLE_TIMEOUT_SECS, self.idle_timeout_secs
            )));
        }

        Ok(())
    }

    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_secs)
    }
}
