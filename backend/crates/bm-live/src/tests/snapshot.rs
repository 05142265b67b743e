use crate::Snapshot;

use serde_json::json;

#[test]
fn given_snapshot_when_to_message_then_tagged_json() {
    // Given
    let snapshot = Snapshot {
        count: 2,
        online: true,
        html: String::from("<ul></ul>"),
    };

    // When
    let message = snapshot.to_message().unwrap();

    // Then
    assert_eq!(message.message_type, "snapshot");
    let value: serde_json::Value = serde_json::from_str(&message.payload).unwrap();
    assert_eq!(
        value,
        json!({"type": "snapshot", "count": 2, "online": true, "html": "<ul></ul>"})
    );
}
