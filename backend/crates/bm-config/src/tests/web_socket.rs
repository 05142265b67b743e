use crate::WebSocketConfig;

use googletest::assert_that;
use googletest::prelude::{anything, err, ok};

#[test]
fn given_defaults_when_validate_then_ok() {
    assert_that!(WebSocketConfig::default().validate(), ok(anything()));
}

#[test]
fn given_zero_send_buffer_when_validate_then_error() {
    // Given
    let config = WebSocketConfig {
        send_buffer_size: 0,
        ..Default::default()
    };

    // When / Then
    assert_that!(config.validate(), err(anything()));
}

#[test]
fn given_oversized_broadcast_capacity_when_validate_then_error() {
    // Given
    let config = WebSocketConfig {
        broadcast_capacity: 10_001,
        ..Default::default()
    };

    // When / Then
    assert_that!(config.validate(), err(anything()));
}

#[test]
fn given_heartbeat_too_fast_when_validate_then_error() {
    // Given
    let config = WebSocketConfig {
        heartbeat_interval_secs: 1,
        ..Default::default()
    };

    // When / Then
    assert_that!(config.validate(), err(anything()));
}
