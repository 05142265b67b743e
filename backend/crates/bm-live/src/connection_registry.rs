use crate::{ConnectionId, ConnectionInfo, ConnectionLimits, LiveError, Result as LiveErrorResult};

use std::collections::HashMap;
use std::panic::Location;
use std::sync::Arc;

use error_location::ErrorLocation;
use log::{info, warn};
use tokio::sync::RwLock;
use uuid::Uuid;

/// Registry for tracking open live connections
pub struct ConnectionRegistry {
    inner: Arc<RwLock<RegistryInner>>,
    limits: ConnectionLimits,
}

struct RegistryInner {
    connections: HashMap<ConnectionId, ConnectionInfo>,
}

impl ConnectionRegistry {
    pub fn new(limits: ConnectionLimits) -> Self {
        Self {
            inner: Arc::new(RwLock::new(RegistryInner {
                connections: HashMap::new(),
            })),
            limits,
        }
    }

    /// Register a new connection for `owner`, enforcing both limits
    pub async fn register(&self, owner: Uuid) -> LiveErrorResult<ConnectionId> {
        let mut inner = self.inner.write().await;

        let total = inner.connections.len();
        if total >= self.limits.max_total {
            warn!(
                "Total connection limit reached: {}/{}",
                total, self.limits.max_total
            );
            return Err(LiveError::ConnectionLimitExceeded {
                current: total,
                max: self.limits.max_total,
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let per_owner = inner
            .connections
            .values()
            .filter(|info| info.owner == owner)
            .count();
        if per_owner >= self.limits.max_per_owner {
            warn!(
                "Connection limit reached for owner {owner}: {}/{}",
                per_owner, self.limits.max_per_owner
            );
            return Err(LiveError::ConnectionLimitExceeded {
                current: per_owner,
                max: self.limits.max_per_owner,
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let connection_id = ConnectionId::new();
        inner.connections.insert(
            connection_id,
            ConnectionInfo {
                connection_id,
                owner,
                connected_at: chrono::Utc::now(),
            },
        );
        info!(
            "Registered connection {connection_id} for {owner} ({} total)",
            inner.connections.len()
        );

        Ok(connection_id)
    }

    pub async fn unregister(&self, connection_id: ConnectionId) {
        let mut inner = self.inner.write().await;

        if inner.connections.remove(&connection_id).is_some() {
            info!(
                "Unregistered connection {connection_id} ({} total remaining)",
                inner.connections.len()
            );
        }
    }

    pub async fn get(&self, connection_id: ConnectionId) -> Option<ConnectionInfo> {
        let inner = self.inner.read().await;
        inner.connections.get(&connection_id).cloned()
    }

    pub async fn total_count(&self) -> usize {
        let inner = self.inner.read().await;
        inner.connections.len()
    }
}

impl Clone for ConnectionRegistry {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            limits: self.limits.clone(),
        }
    }
}
