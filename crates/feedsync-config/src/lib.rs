//! feedsync configuration system.
//!
//! Provides TOML-based configuration with validation. All config sections
//! use sensible defaults so partial configs work out of the box.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use feedsync_config::load_config;
//!
//! let config = load_config(None).expect("failed to load config");
//! println!("shortest poll delay: {}ms", config.polling.min_delay_ms);
//! ```

pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::FeedsyncConfig;

use std::path::Path;

use feedsync_common::ConfigError;

/// Environment variable that overrides `server.cookie`.
pub const COOKIE_ENV_VAR: &str = "FEEDSYNC_COOKIE";

/// Load config from `path`, or from the platform default path when `None`.
///
/// Applies environment overrides and validates the result; an invalid
/// config is an error here, unlike the lenient `toml_loader` functions.
pub fn load_config(path: Option<&Path>) -> Result<FeedsyncConfig, ConfigError> {
    let config = load_unvalidated(path)?;
    validation::validate(&config)?;
    Ok(config)
}

/// Load config and apply environment overrides without validating.
///
/// For callers that layer further overrides (command-line flags) on top and
/// validate the final result themselves.
pub fn load_unvalidated(path: Option<&Path>) -> Result<FeedsyncConfig, ConfigError> {
    let mut config = match path {
        Some(p) => toml_loader::load_from_path(p)?,
        None => toml_loader::load_default()?,
    };
    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    Ok(config)
}

/// Apply environment overrides using `lookup` to read variables.
pub fn apply_env_overrides<F>(config: &mut FeedsyncConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(cookie) = lookup(COOKIE_ENV_VAR).filter(|c| !c.trim().is_empty()) {
        tracing::debug!("using session cookie from {COOKIE_ENV_VAR}");
        config.server.cookie = Some(cookie);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_cookie_overrides_config() {
        let mut config = FeedsyncConfig::default();
        config.server.cookie = Some("sessionid=old".into());
        apply_env_overrides(&mut config, |key| {
            (key == COOKIE_ENV_VAR).then(|| "sessionid=new; csrftoken=abc".to_string())
        });
        assert_eq!(
            config.server.cookie.as_deref(),
            Some("sessionid=new; csrftoken=abc")
        );
    }

    #[test]
    fn blank_env_cookie_is_ignored() {
        let mut config = FeedsyncConfig::default();
        config.server.cookie = Some("sessionid=kept".into());
        apply_env_overrides(&mut config, |_| Some("   ".to_string()));
        assert_eq!(config.server.cookie.as_deref(), Some("sessionid=kept"));
    }

    #[test]
    fn load_config_rejects_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[polling]\nempty_growth = 0.1\n").unwrap();
        let err = load_config(Some(&path)).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn load_unvalidated_returns_invalid_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[server]\nbase_url = \"ftp://chat.local/\"\n").unwrap();
        let config = load_unvalidated(Some(&path)).unwrap();
        assert_eq!(config.server.base_url, "ftp://chat.local/");
        assert!(validation::validate(&config).is_err());
    }
}
