//! Tests for the full validation pipeline.

use super::*;
use crate::schema::*;

#[test]
fn default_config_validates() {
    let config = FeedsyncConfig::default();
    assert!(validate(&config).is_ok());
}

#[test]
fn catches_max_delay_below_min_delay() {
    let mut config = FeedsyncConfig::default();
    config.polling.min_delay_ms = 5000;
    config.polling.max_delay_ms = 2000;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("must not be below polling.min_delay_ms"));
}

#[test]
fn catches_min_delay_too_small() {
    let mut config = FeedsyncConfig::default();
    config.polling.min_delay_ms = 10;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("polling.min_delay_ms"));
}

#[test]
fn catches_shrinking_growth_factor() {
    let mut config = FeedsyncConfig::default();
    config.polling.empty_growth = 0.5;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("polling.empty_growth"));
}

#[test]
fn catches_nan_growth_factor() {
    let mut config = FeedsyncConfig::default();
    config.polling.failure_growth = f64::NAN;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("polling.failure_growth"));
}

#[test]
fn catches_non_http_base_url() {
    let mut config = FeedsyncConfig::default();
    config.server.base_url = "ftp://chat.example.com".into();
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("server.base_url"));

    config.server.base_url = "https://".into();
    assert!(validate(&config).is_err());
}

#[test]
fn accepts_https_base_url() {
    let mut config = FeedsyncConfig::default();
    config.server.base_url = "https://chat.example.com/app/".into();
    assert!(validate(&config).is_ok());
}

#[test]
fn catches_probe_interval_zero() {
    let mut config = FeedsyncConfig::default();
    config.probe.interval_secs = 0;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("probe.interval_secs"));
}

#[test]
fn collects_multiple_errors() {
    let mut config = FeedsyncConfig::default();
    config.display.max_entries = 1;
    config.server.request_timeout_secs = 0;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("display.max_entries"));
    assert!(err.contains("server.request_timeout_secs"));
    assert!(err.contains("; "));
}
