use crate::{ConfigError, ConfigErrorResult};

use std::time::Duration;

use serde::Deserialize;

// Delete confirmation window (milliseconds)
pub const MIN_DELETE_CONFIRM_WINDOW_MS: u64 = 500;
pub const MAX_DELETE_CONFIRM_WINDOW_MS: u64 = 60_000;
pub const DEFAULT_DELETE_CONFIRM_WINDOW_MS: u64 = 3000;

// Bookmark title length
pub const MIN_TITLE_LENGTH: usize = 1;
pub const MAX_TITLE_LENGTH: usize = 1000;
pub const DEFAULT_MAX_TITLE_LENGTH: usize = 200;

// Dashboards without an open tab are released after this long (seconds)
pub const MIN_DASHBOARD_IDLE_TIMEOUT_SECS: u64 = 10;
pub const MAX_DASHBOARD_IDLE_TIMEOUT_SECS: u64 = 24 * 60 * 60;
pub const DEFAULT_DASHBOARD_IDLE_TIMEOUT_SECS: u64 = 300;

// Idle session and dashboard sweep (seconds)
pub const MIN_SWEEP_INTERVAL_SECS: u64 = 1;
pub const MAX_SWEEP_INTERVAL_SECS: u64 = 3600;
pub const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 60;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// How long the first delete press stays armed
    pub delete_confirm_window_ms: u64,
    pub max_title_length: usize,
    /// How long a dashboard with no open tab is kept
    pub idle_timeout_secs: u64,
    pub sweep_interval_secs: u64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            delete_confirm_window_ms: DEFAULT_DELETE_CONFIRM_WINDOW_MS,
            max_title_length: DEFAULT_MAX_TITLE_LENGTH,
            idle_timeout_secs: DEFAULT_DASHBOARD_IDLE_TIMEOUT_SECS,
            sweep_interval_secs: DEFAULT_SWEEP_INTERVAL_SECS,
        }
    }
}

impl DashboardConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.delete_confirm_window_ms < MIN_DELETE_CONFIRM_WINDOW_MS
            || self.delete_confirm_window_ms > MAX_DELETE_CONFIRM_WINDOW_MS
        {
            return Err(ConfigError::config(format!(
                "dashboard.delete_confirm_window_ms must be {}-{}, got {}",
                MIN_DELETE_CONFIRM_WINDOW_MS,
                MAX_DELETE_CONFIRM_WINDOW_MS,
                self.delete_confirm_window_ms
            )));
        }

        if self.max_title_length < MIN_TITLE_LENGTH || self.max_title_length > MAX_TITLE_LENGTH {
            return Err(ConfigError::config(format!(
                "dashboard.max_title_length must be {}-{}, got {}",
                MIN_TITLE_LENGTH, MAX_TITLE_LENGTH, self.max_title_length
            )));
        }

        if self.idle_timeout_secs < MIN_DASHBOARD_IDLE_TIMEOUT_SECS
            || self.idle_timeout_secs > MAX_DASHBOARD_IDLE_TIMEOUT_SECS
        {
            return Err(ConfigError::config(format!(
                "dashboard.idle_timeout_secs must be {}-{}, got {}",
                MIN_DASHBOARD_IDLE_TIMEOUT_SECS,
                MAX_DASHBOARD_IDLE_TIMEOUT_SECS,
                self.idle_timeout_secs
            )));
        }

        if self.sweep_interval_secs < MIN_SWEEP_INTERVAL_SECS
            || self.sweep_interval_secs > MAX_SWEEP_INTERVAL_SECS
        {
            return Err(ConfigError::config(format!(
                "dashboard.sweep_interval_secs must be {}-{}, got {}",
                MIN_SWEEP_INTERVAL_SECS, MAX_SWEEP_INTERVAL_SECS, self.sweep_interval_secs
            )));
        }

        Ok(())
    }

    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_secs)
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }

    pub fn delete_confirm_window(&self) -> Duration {
        Duration::from_millis(self.delete_confirm_window_ms)
    }
}
