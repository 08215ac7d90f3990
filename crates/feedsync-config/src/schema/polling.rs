use serde::{Deserialize, Serialize};

/// Adaptive polling timings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PollingConfig {
    /// Delay after activity or delivered data, in milliseconds.
    pub min_delay_ms: u64,
    /// Upper bound for backoff, in milliseconds.
    pub max_delay_ms: u64,
    /// Inactivity window before polling pauses, in milliseconds.
    pub idle_timeout_ms: u64,
    /// Delay multiplier after a fetch that returned nothing new.
    pub empty_growth: f64,
    /// Delay multiplier after a failed fetch.
    pub failure_growth: f64,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            min_delay_ms: 1000,
            max_delay_ms: 15000,
            idle_timeout_ms: 60000,
            empty_growth: 1.7,
            failure_growth: 2.0,
        }
    }
}
