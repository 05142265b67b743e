use crate::RealtimeConfig;

use std::time::Duration;

use googletest::assert_that;
use googletest::prelude::{anything, eq, err, ok};

#[test]
fn given_defaults_when_validate_then_ok() {
    assert_that!(RealtimeConfig::default().validate(), ok(anything()));
}

#[test]
fn given_empty_channel_when_validate_then_error() {
    // Given
    let config = RealtimeConfig {
        channel: String::from(" "),
        ..Default::default()
    };

    // When / Then
    assert_that!(config.validate(), err(anything()));
}

#[test]
fn given_heartbeat_above_maximum_when_validate_then_error() {
    // Given
    let config = RealtimeConfig {
        heartbeat_interval_secs: 301,
        ..Default::default()
    };

    // When / Then
    assert_that!(config.validate(), err(anything()));
}

#[test]
fn given_zero_event_buffer_when_validate_then_error() {
    // Given
    let config = RealtimeConfig {
        event_buffer_size: 0,
        ..Default::default()
    };

    // When / Then
    assert_that!(config.validate(), err(anything()));
}

#[test]
fn given_defaults_when_reconnect_delay_then_doubles_up_to_maximum() {
    let config = RealtimeConfig::default();

    assert_that!(config.reconnect_delay(0), eq(Duration::from_secs(1)));
    assert_that!(config.reconnect_delay(2), eq(Duration::from_secs(4)));
    assert_that!(config.reconnect_delay(10), eq(Duration::from_secs(30)));
    assert_that!(config.reconnect_delay(u32::MAX), eq(Duration::from_secs(30)));
}

#[test]
fn given_reconnect_delay_above_maximum_when_validate_then_error() {
    // Given
    let config = RealtimeConfig {
        reconnect_delay_ms: 5000,
        max_reconnect_delay_ms: 1000,
        ..Default::default()
    };

    // When / Then
    assert_that!(config.validate(), err(anything()));
}
