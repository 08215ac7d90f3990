//! Tests for TOML config loading, creation, and path resolution.

use super::*;
use std::path::Path;

#[test]
fn load_from_nonexistent_returns_file_not_found() {
    let result = load_from_path(Path::new("/tmp/nonexistent_feedsync_config.toml"));
    let err = result.unwrap_err();
    assert!(matches!(err, feedsync_common::ConfigError::FileNotFound(_)));
}

#[test]
fn load_valid_partial_toml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
[server]
base_url = "https://chat.example.com/"

[polling]
max_delay_ms = 30000
"#,
    )
    .unwrap();

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.server.base_url, "https://chat.example.com/");
    assert_eq!(config.polling.max_delay_ms, 30000);
    // Defaults preserved
    assert_eq!(config.polling.min_delay_ms, 1000);
    assert_eq!(config.polling.idle_timeout_ms, 60000);
    assert_eq!(config.server.csrf_cookie_name, "csrftoken");
}

#[test]
fn load_invalid_toml_returns_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "this is not valid toml {{{").unwrap();

    let err = load_from_path(&path).unwrap_err();
    assert!(matches!(err, feedsync_common::ConfigError::ParseError(_)));
}

#[test]
fn load_config_with_invalid_values_is_returned_as_parsed() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
[polling]
min_delay_ms = 5000
max_delay_ms = 1000
"#,
    )
    .unwrap();

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.polling.max_delay_ms, 1000);
}

#[test]
fn create_and_load_default_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("feedsync").join("config.toml");

    create_default_config(&path).unwrap();
    assert!(path.exists());

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.server.base_url, "http://127.0.0.1:8000/");
    assert_eq!(config.polling.empty_growth, 1.7);
}

#[test]
fn create_default_config_keeps_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[polling]\nmin_delay_ms = 2000\n").unwrap();

    create_default_config(&path).unwrap();

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.polling.min_delay_ms, 2000);
}

#[test]
fn default_config_toml_is_valid() {
    use super::template::default_config_toml;
    use crate::schema::FeedsyncConfig;

    let config: FeedsyncConfig = toml::from_str(&default_config_toml()).unwrap();
    assert!(crate::validation::validate(&config).is_ok());
}

#[test]
fn log_level_parses_uppercase() {
    let config: crate::schema::FeedsyncConfig = toml::from_str(
        r#"
[logging]
level = "DEBUG"
"#,
    )
    .unwrap();
    assert_eq!(config.logging.level, crate::schema::LogLevel::Debug);
    assert_eq!(config.logging.level.directive(), "feedsync=debug");
}

#[test]
fn default_config_path_is_reasonable() {
    if let Ok(path) = default_config_path() {
        let path_str = path.to_string_lossy();
        assert!(path_str.contains("feedsync"));
        assert!(path_str.ends_with("config.toml"));
    }
}
