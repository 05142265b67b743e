/// Configuration for per-owner broadcast channels
#[derive(Debug, Clone)]
pub struct BroadcastConfig {
    /// Snapshots buffered per owner; lagging tabs skip ahead
    pub channel_capacity: usize,
}

impl Default for BroadcastConfig {
    fn default() -> Self {
        Self {
            channel_capacity: 64,
        }
    }
}

impl From<&bm_config::WebSocketConfig> for BroadcastConfig {
    fn from(config: &bm_config::WebSocketConfig) -> Self {
        Self {
            channel_capacity: config.broadcast_capacity,
        }
    }
}
