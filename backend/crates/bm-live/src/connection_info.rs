use crate::ConnectionId;

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Information about an open dashboard tab
#[derive(Debug, Clone)]
pub struct ConnectionInfo {
    pub connection_id: ConnectionId,
    pub owner: Uuid,
    pub connected_at: DateTime<Utc>,
}
