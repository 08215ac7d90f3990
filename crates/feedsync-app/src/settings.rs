//! Load configuration and map it onto the core's runtime types.

use std::time::Duration;

use feedsync_config::schema::{PollingConfig, ServerConfig};
use feedsync_config::FeedsyncConfig;
use feedsync_core::{HttpStoreConfig, PollingPolicy};

use crate::cli::Args;

/// Load the config file, layer environment and command-line overrides on
/// top, then validate the result once.
pub fn load_config(args: &Args) -> feedsync_common::Result<FeedsyncConfig> {
    let mut config = feedsync_config::load_unvalidated(args.config.as_deref())?;
    apply_cli_overrides(&mut config, args);
    feedsync_config::validation::validate(&config)?;
    Ok(config)
}

/// Command-line flags win over the config file and the environment.
pub fn apply_cli_overrides(config: &mut FeedsyncConfig, args: &Args) {
    if let Some(url) = &args.base_url {
        config.server.base_url = url.clone();
    }
    if let Some(cookie) = &args.cookie {
        config.server.cookie = Some(cookie.clone());
    }
}

pub fn polling_policy(polling: &PollingConfig) -> PollingPolicy {
    PollingPolicy {
        min_delay_ms: polling.min_delay_ms,
        max_delay_ms: polling.max_delay_ms,
        idle_timeout_ms: polling.idle_timeout_ms,
        empty_growth: polling.empty_growth,
        failure_growth: polling.failure_growth,
    }
}

pub fn store_config(server: &ServerConfig) -> HttpStoreConfig {
    HttpStoreConfig {
        base_url: server.base_url.clone(),
        cookie: server.cookie.clone(),
        csrf_cookie_name: server.csrf_cookie_name.clone(),
        csrf_header: server.csrf_header.clone(),
        connect_timeout: Duration::from_secs(server.connect_timeout_secs.into()),
        request_timeout: Duration::from_secs(server.request_timeout_secs.into()),
    }
}

/// Log directive: the `--log-level` flag, else the configured level.
pub fn log_directive<'a>(flag: Option<&'a str>, config: &FeedsyncConfig) -> &'a str {
    flag.unwrap_or_else(|| config.logging.level.directive())
}
