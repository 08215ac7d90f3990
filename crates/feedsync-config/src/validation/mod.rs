//! Full configuration validation.
//!
//! Validates numeric ranges, delay ordering, and the server URL. Each
//! section has its own validator; this orchestrator calls them all and
//! collects errors into a single `ConfigError`.

mod helpers;
mod misc;
mod polling;

#[cfg(test)]
mod tests;

use crate::schema::FeedsyncConfig;
use feedsync_common::ConfigError;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &FeedsyncConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    polling::validate_polling(&mut errors, config);
    misc::validate_server(&mut errors, config);
    misc::validate_probe(&mut errors, config);
    misc::validate_display(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}
