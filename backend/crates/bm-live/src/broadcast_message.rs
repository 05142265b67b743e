/// A message fanned out to every open tab of one owner
#[derive(Debug, Clone)]
pub struct BroadcastMessage {
    /// Serialized JSON, ready to send as a text frame
    pub payload: String,
    /// Message type for metrics/logging
    pub message_type: String,
}

impl BroadcastMessage {
    pub fn new(payload: String, message_type: &str) -> Self {
        Self {
            payload,
            message_type: message_type.to_string(),
        }
    }
}
