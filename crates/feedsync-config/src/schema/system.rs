//! System configuration types: connectivity probe, display, and logging.

use serde::{Deserialize, Serialize};

/// Background reachability check standing in for browser online/offline
/// events.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    pub enabled: bool,
    /// Seconds between probes (valid range: 1-300).
    pub interval_secs: u32,
    /// Connect timeout per probe in milliseconds.
    pub timeout_ms: u32,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_secs: 5,
            timeout_ms: 2000,
        }
    }
}

/// Terminal feed display.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Entries kept in the in-memory feed before the oldest are evicted.
    pub max_entries: u32,
    pub show_timestamps: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            max_entries: 500,
            show_timestamps: true,
        }
    }
}

/// Log level.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
#[derive(Default)]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    Warning,
    Error,
}

impl LogLevel {
    /// Filter directive for `tracing_subscriber::EnvFilter`.
    pub fn directive(&self) -> &'static str {
        match self {
            LogLevel::Debug => "feedsync=debug",
            LogLevel::Info => "feedsync=info",
            LogLevel::Warning => "feedsync=warn",
            LogLevel::Error => "feedsync=error",
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct LoggingConfig {
    pub level: LogLevel,
}
