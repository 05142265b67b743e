//! Browser-facing live updates: per-owner snapshot fan-out over websockets.

pub mod broadcast_config;
pub mod broadcast_message;
pub mod connection_config;
pub mod connection_id;
pub mod connection_info;
pub mod connection_limits;
pub mod connection_registry;
pub mod error;
pub mod live_connection;
pub mod metrics;
pub mod owner_broadcaster;
pub mod shutdown_coordinator;
pub mod shutdown_guard;
pub mod snapshot;

pub use broadcast_config::BroadcastConfig;
pub use broadcast_message::BroadcastMessage;
pub use connection_config::ConnectionConfig;
pub use connection_id::ConnectionId;
pub use connection_info::ConnectionInfo;
pub use connection_limits::ConnectionLimits;
pub use connection_registry::ConnectionRegistry;
pub use error::{LiveError, Result};
pub use live_connection::LiveConnection;
pub use metrics::Metrics;
pub use owner_broadcaster::OwnerBroadcaster;
pub use shutdown_coordinator::ShutdownCoordinator;
pub use shutdown_guard::ShutdownGuard;
pub use snapshot::Snapshot;

#[cfg(test)]
mod tests;
