use std::time::Duration;

/// Configuration for live websocket connections
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    /// Outgoing frames buffered per connection
    pub send_buffer_size: usize,
    /// Ping interval in seconds
    pub heartbeat_interval_secs: u64,
}

impl ConnectionConfig {
    pub fn heartbeat_interval(&self) -> Duration {
        Duration::from_secs(self.heartbeat_interval_secs)
    }
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            send_buffer_size: 100,
            heartbeat_interval_secs: 30,
        }
    }
}

impl From<&bm_config::WebSocketConfig> for ConnectionConfig {
    fn from(config: &bm_config::WebSocketConfig) -> Self {
        Self {
            send_buffer_size: config.send_buffer_size,
            heartbeat_interval_secs: config.heartbeat_interval_secs,
        }
    }
}
