use crate::{ConfigError, ConfigErrorResult};

use std::time::Duration;

use serde::Deserialize;

pub const DEFAULT_CHANNEL: &str = "bookmarks-realtime";

// Phoenix heartbeat interval (seconds)
pub const MIN_REALTIME_HEARTBEAT_SECS: u64 = 5;
pub const MAX_REALTIME_HEARTBEAT_SECS: u64 = 300;
pub const DEFAULT_REALTIME_HEARTBEAT_SECS: u64 = 30;

pub const MIN_EVENT_BUFFER_SIZE: usize = 1;
pub const MAX_EVENT_BUFFER_SIZE: usize = 10000;
pub const DEFAULT_EVENT_BUFFER_SIZE: usize = 64;

// Resubscribe backoff after the channel ends (milliseconds)
pub const MIN_RECONNECT_DELAY_MS: u64 = 100;
pub const MAX_RECONNECT_DELAY_MS: u64 = 600_000;
pub const DEFAULT_RECONNECT_DELAY_MS: u64 = 1000;
pub const DEFAULT_MAX_RECONNECT_DELAY_MS: u64 = 30_000;

/// Live-update channel (realtime broker) settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RealtimeConfig {
    pub heartbeat_interval_secs: u64,
    /// Channel name, joined as topic `realtime:<channel>`
    pub channel: String,
    /// Buffered change events per subscription
    pub event_buffer_size: usize,
    /// First resubscribe delay; doubles per failed attempt
    pub reconnect_delay_ms: u64,
    pub max_reconnect_delay_ms: u64,
}

impl Default for RealtimeConfig {
    fn default() -> Self {
        Self {
            heartbeat_interval_secs: DEFAULT_REALTIME_HEARTBEAT_SECS,
            channel: String::from(DEFAULT_CHANNEL),
            event_buffer_size: DEFAULT_EVENT_BUFFER_SIZE,
            reconnect_delay_ms: DEFAULT_RECONNECT_DELAY_MS,
            max_reconnect_delay_ms: DEFAULT_MAX_RECONNECT_DELAY_MS,
        }
    }
}

impl RealtimeConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.heartbeat_interval_secs < MIN_REALTIME_HEARTBEAT_SECS
            || self.heartbeat_interval_secs > MAX_REALTIME_HEARTBEAT_SECS
        {
            return Err(ConfigError::config(format!(
                "realtime.heartbeat_interval_secs must be {}-{}, got {}",
                MIN_REALTIME_HEARTBEAT_SECS,
                MAX_REALTIME_HEARTBEAT_SECS,
                self.heartbeat_interval_secs
            )));
        }

        if self.channel.trim().is_empty() {
            return Err(ConfigError::config("realtime.channel must not be empty"));
        }

        if self.event_buffer_size < MIN_EVENT_BUFFER_SIZE
            || self.event_buffer_size > MAX_EVENT_BUFFER_SIZE
        {
            return Err(ConfigError::config(format!(
                "realtime.event_buffer_size must be {}-{}, got {}",
                MIN_EVENT_BUFFER_SIZE, MAX_EVENT_BUFFER_SIZE, self.event_buffer_size
            )));
        }

        if self.reconnect_delay_ms < MIN_RECONNECT_DELAY_MS
            || self.max_reconnect_delay_ms > MAX_RECONNECT_DELAY_MS
            || self.reconnect_delay_ms > self.max_reconnect_delay_ms
        {
            return Err(ConfigError::config(format!(
                "realtime reconnect delays must satisfy {} <= reconnect_delay_ms ({}) <= max_reconnect_delay_ms ({}) <= {}",
                MIN_RECONNECT_DELAY_MS,
                self.reconnect_delay_ms,
                self.max_reconnect_delay_ms,
                MAX_RECONNECT_DELAY_MS
            )));
        }

        Ok(())
    }

    /// Delay before resubscribe attempt `attempt` (0-based).
    pub fn reconnect_delay(&self, attempt: u32) -> Duration {
        let delay = self
            .reconnect_delay_ms
            .saturating_mul(1u64 << attempt.min(16))
            .min(self.max_reconnect_delay_ms);
        Duration::from_millis(delay)
    }
}
