//! Phoenix channel frames as spoken by the realtime broker.

use bm_core::{Bookmark, LiveEvent, SubscriptionStatus};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use uuid::Uuid;

pub const HEARTBEAT_TOPIC: &str = "phoenix";
pub const PROTOCOL_VERSION: &str = "1.0.0";

const EVENT_JOIN: &str = "phx_join";
const EVENT_REPLY: &str = "phx_reply";
const EVENT_ERROR: &str = "phx_error";
const EVENT_CLOSE: &str = "phx_close";
const EVENT_HEARTBEAT: &str = "heartbeat";
const EVENT_CHANGES: &str = "postgres_changes";
const EVENT_SYSTEM: &str = "system";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhoenixFrame {
    pub topic: String,
    pub event: String,
    #[serde(default)]
    pub payload: Value,
    #[serde(rename = "ref", default)]
    pub reference: Option<String>,
}

impl PhoenixFrame {
    /// Join `topic` listening for inserts and deletes on `table` rows owned by `owner`.
    pub fn join(topic: &str, table: &str, owner: Uuid, access_token: &str, reference: &str) -> Self {
        let filter = format!("user_id=eq.{owner}");
        let changes: Vec<Value> = ["INSERT", "DELETE"]
            .iter()
            .map(|event| {
                json!({
                    "event": event,
                    "schema": "public",
                    "table": table,
                    "filter": filter,
                })
            })
            .collect();

        Self {
            topic: topic.to_string(),
            event: EVENT_JOIN.to_string(),
            payload: json!({
                "config": {
                    "broadcast": { "ack": false, "self": false },
                    "presence": { "key": "" },
                    "postgres_changes": changes,
                    "private": false,
                },
                "access_token": access_token,
            }),
            reference: Some(reference.to_string()),
        }
    }

    pub fn heartbeat(reference: &str) -> Self {
        Self {
            topic: HEARTBEAT_TOPIC.to_string(),
            event: EVENT_HEARTBEAT.to_string(),
            payload: json!({}),
            reference: Some(reference.to_string()),
        }
    }

    pub fn leave(topic: &str, reference: &str) -> Self {
        Self {
            topic: topic.to_string(),
            event: String::from("phx_leave"),
            payload: json!({}),
            reference: Some(reference.to_string()),
        }
    }
}

/// Topic name for a channel.
pub fn topic(channel: &str) -> String {
    format!("realtime:{channel}")
}

/// Translate an incoming frame into a live event for the joined `topic`.
/// Heartbeat replies and frames for other topics yield `None`.
pub fn decode_event(frame: &PhoenixFrame, topic: &str, join_ref: &str) -> Option<LiveEvent> {
    if frame.topic != topic {
        return None;
    }

    match frame.event.as_str() {
        EVENT_REPLY => {
            if frame.reference.as_deref() != Some(join_ref) {
                return None;
            }
            let status = match frame.payload.get("status").and_then(Value::as_str) {
                Some("ok") => SubscriptionStatus::Subscribed,
                other => {
                    warn!("join rejected ({:?}): {}", other, frame.payload);
                    SubscriptionStatus::Errored
                }
            };
            Some(LiveEvent::Status(status))
        }
        EVENT_ERROR => Some(LiveEvent::Status(SubscriptionStatus::Errored)),
        EVENT_CLOSE => Some(LiveEvent::Status(SubscriptionStatus::Closed)),
        EVENT_SYSTEM => {
            let failed = frame.payload.get("status").and_then(Value::as_str) == Some("error");
            if failed {
                warn!("realtime system error: {}", frame.payload);
                Some(LiveEvent::Status(SubscriptionStatus::Errored))
            } else {
                None
            }
        }
        EVENT_CHANGES => decode_change(&frame.payload),
        _ => None,
    }
}

fn decode_change(payload: &Value) -> Option<LiveEvent> {
    let data = payload.get("data")?;

    match data.get("type").and_then(Value::as_str)? {
        "INSERT" => {
            let record = data.get("record")?.clone();
            match serde_json::from_value::<Bookmark>(record) {
                Ok(bookmark) => Some(LiveEvent::Inserted(bookmark)),
                Err(e) => {
                    warn!("unreadable inserted row: {e}");
                    None
                }
            }
        }
        "DELETE" => {
            let id = data
                .get("old_record")
                .and_then(|old| old.get("id"))
                .and_then(Value::as_str)
                .and_then(|id| Uuid::parse_str(id).ok())?;
            Some(LiveEvent::Deleted(id))
        }
        other => {
            debug!("ignoring {other} change");
            None
        }
    }
}
