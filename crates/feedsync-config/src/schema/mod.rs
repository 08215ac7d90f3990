//! Configuration schema types for feedsync.
//!
//! All structs use `serde(default)` so partial configs work correctly.
//! Missing fields are filled with the defaults the chat client ships with.

mod polling;
mod server;
mod system;

pub use polling::*;
pub use server::*;
pub use system::*;

use serde::{Deserialize, Serialize};

/// Root configuration for feedsync.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct FeedsyncConfig {
    pub server: ServerConfig,
    pub polling: PollingConfig,
    pub probe: ProbeConfig,
    pub display: DisplayConfig,
    pub logging: LoggingConfig,
}
