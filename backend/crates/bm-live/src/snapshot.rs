use crate::{BroadcastMessage, Result};

use serde::Serialize;

pub const SNAPSHOT_MESSAGE_TYPE: &str = "snapshot";

/// Full dashboard state pushed to the browser; the page swaps the list
/// fragment in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename = "snapshot")]
pub struct Snapshot {
    pub count: usize,
    pub online: bool,
    /// Rendered bookmark list fragment
    pub html: String,
}

impl Snapshot {
    pub fn to_message(&self) -> Result<BroadcastMessage> {
        let payload = serde_json::to_string(self)?;
        Ok(BroadcastMessage::new(payload, SNAPSHOT_MESSAGE_TYPE))
    }
}
