use crate::tests::{EnvGuard, clear_backend_env, setup_config_dir};
use crate::{CONFIG_FILE_NAME, Config, ConfigError};

use googletest::assert_that;
use googletest::prelude::{anything, eq, err, ok};
use serial_test::serial;

// =========================================================================
// Loading
// =========================================================================

#[test]
#[serial]
fn given_no_config_file_when_load_then_ok_with_defaults() {
    // Given
    let (_temp, _dir) = setup_config_dir();
    let _env = clear_backend_env();

    // When
    let result = Config::load();

    // Then
    assert_that!(result, ok(anything()));
    let config = result.unwrap();
    assert_that!(config.server.port, eq(crate::DEFAULT_PORT));
    assert_that!(
        config.server.max_connections,
        eq(crate::DEFAULT_MAX_CONNECTIONS)
    );
    assert_that!(config.dashboard.delete_confirm_window_ms, eq(3000));
    assert_eq!(config.session.cookie_name, "bm-session");
    assert_eq!(config.realtime.channel, "bookmarks-realtime");
    assert!(config.supabase.url.is_empty());
}

#[test]
#[serial]
fn given_missing_config_dir_when_load_then_directory_is_created() {
    // Given
    let (temp, _dir) = setup_config_dir();
    let nested = temp.path().join("nested");
    let _nested = EnvGuard::set(crate::CONFIG_DIR_ENV, nested.to_str().unwrap());

    // When
    let result = Config::load();

    // Then
    assert_that!(result, ok(anything()));
    assert!(nested.is_dir());
}

#[test]
#[serial]
fn given_defaults_without_backend_when_validate_then_error() {
    // Given
    let (_temp, _dir) = setup_config_dir();
    let _env = clear_backend_env();
    let config = Config::load().unwrap();

    // When
    let result = config.validate();

    // Then
    assert_that!(result, err(anything()));
}

#[test]
#[serial]
fn given_toml_file_when_load_then_uses_toml_values() {
    // Given
    let (temp, _dir) = setup_config_dir();
    let _env = clear_backend_env();
    std::fs::write(
        temp.path().join(CONFIG_FILE_NAME),
        r#"
            [server]
            port = 9000

            [supabase]
            url = "https://project.supabase.co"
            anon_key = "anon"

            [dashboard]
            delete_confirm_window_ms = 5000
        "#,
    )
    .unwrap();

    // When
    let config = Config::load().unwrap();

    // Then
    assert_that!(config.server.port, eq(9000));
    assert_that!(config.dashboard.delete_confirm_window_ms, eq(5000));
    assert_eq!(config.supabase.url, "https://project.supabase.co");
    assert_that!(config.validate(), ok(anything()));
}

#[test]
#[serial]
fn given_env_var_and_toml_when_load_then_env_var_overrides_toml() {
    // Given
    let (temp, _dir) = setup_config_dir();
    let _env = clear_backend_env();
    std::fs::write(temp.path().join(CONFIG_FILE_NAME), "[server]\nport = 9000\n").unwrap();
    let _port = EnvGuard::set("BM_SERVER_PORT", "9100");

    // When
    let config = Config::load().unwrap();

    // Then
    assert_that!(config.server.port, eq(9100));
}

#[test]
#[serial]
fn given_unprefixed_and_prefixed_backend_vars_when_load_then_prefixed_wins() {
    // Given
    let (_temp, _dir) = setup_config_dir();
    let _env = clear_backend_env();
    let _plain = EnvGuard::set("SUPABASE_URL", "https://plain.supabase.co");
    let _key = EnvGuard::set("SUPABASE_ANON_KEY", "plain-key");
    let _prefixed = EnvGuard::set("BM_SUPABASE_URL", "https://prefixed.supabase.co");

    // When
    let config = Config::load().unwrap();

    // Then
    assert_eq!(config.supabase.url, "https://prefixed.supabase.co");
    assert_eq!(config.supabase.anon_key, "plain-key");
}

#[test]
#[serial]
fn given_unparseable_env_value_when_load_then_value_is_ignored() {
    // Given
    let (_temp, _dir) = setup_config_dir();
    let _port = EnvGuard::set("BM_SERVER_PORT", "not-a-port");

    // When
    let config = Config::load().unwrap();

    // Then
    assert_that!(config.server.port, eq(crate::DEFAULT_PORT));
}

#[test]
#[serial]
fn given_bool_env_values_when_load_then_accepts_true_and_one() {
    // Given
    let (_temp, _dir) = setup_config_dir();
    let _secure = EnvGuard::set("BM_SESSION_SECURE", "1");
    let _colored = EnvGuard::set("BM_LOG_COLORED", "no");

    // When
    let config = Config::load().unwrap();

    // Then
    assert_that!(config.session.secure, eq(true));
    assert_that!(config.logging.colored, eq(false));
}

#[test]
#[serial]
fn given_malformed_toml_when_load_then_toml_error() {
    // Given
    let (temp, _dir) = setup_config_dir();
    std::fs::write(temp.path().join(CONFIG_FILE_NAME), "[server\nport = ").unwrap();

    // When
    let result = Config::load();

    // Then
    assert!(matches!(result, Err(ConfigError::Toml { .. })));
}

// =========================================================================
// Derived values
// =========================================================================

#[test]
#[serial]
fn given_absolute_log_dir_when_validate_then_error() {
    // Given
    let (_temp, _dir) = setup_config_dir();
    let mut config = Config {
        supabase: crate::tests::valid_supabase(),
        ..Default::default()
    };
    config.logging.dir = String::from("/var/log");

    // When
    let result = config.validate();

    // Then
    assert_that!(result, err(anything()));
}

#[test]
#[serial]
fn given_log_file_when_log_file_path_then_joins_config_dir_and_log_dir() {
    // Given
    let (temp, _dir) = setup_config_dir();
    let mut config = Config::default();
    config.logging.file = Some(String::from("server.log"));

    // When
    let path = config.log_file_path().unwrap();

    // Then
    assert_eq!(path, Some(temp.path().join("log").join("server.log")));
}

#[test]
fn given_defaults_when_bind_addr_then_host_and_port() {
    // Given
    let config = Config::default();

    // When
    let addr = config.bind_addr();

    // Then
    assert_eq!(addr, "127.0.0.1:8000");
}
