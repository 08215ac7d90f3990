//! Validation for the smaller sections: server, probe, and display.

use crate::schema::FeedsyncConfig;

use super::helpers::validate_range;

pub(crate) fn validate_server(errors: &mut Vec<String>, config: &FeedsyncConfig) {
    let server = &config.server;
    let url = server.base_url.trim();
    let has_host = url
        .strip_prefix("http://")
        .or_else(|| url.strip_prefix("https://"))
        .is_some_and(|rest| !rest.is_empty() && !rest.starts_with('/'));
    if !has_host {
        errors.push(format!(
            "server.base_url = {:?} must be an http:// or https:// URL",
            server.base_url
        ));
    }
    if server.csrf_header.trim().is_empty() {
        errors.push("server.csrf_header must not be empty".into());
    }
    validate_range(
        errors,
        "server.connect_timeout_secs",
        server.connect_timeout_secs,
        1,
        120,
    );
    validate_range(
        errors,
        "server.request_timeout_secs",
        server.request_timeout_secs,
        1,
        600,
    );
}

pub(crate) fn validate_probe(errors: &mut Vec<String>, config: &FeedsyncConfig) {
    validate_range(
        errors,
        "probe.interval_secs",
        config.probe.interval_secs,
        1,
        300,
    );
    validate_range(
        errors,
        "probe.timeout_ms",
        config.probe.timeout_ms,
        100,
        30_000,
    );
}

pub(crate) fn validate_display(errors: &mut Vec<String>, config: &FeedsyncConfig) {
    validate_range(
        errors,
        "display.max_entries",
        config.display.max_entries,
        10,
        100_000,
    );
}
