//! State, policy, and transition result types for the poll scheduler.

use std::time::Duration;

use feedsync_common::{FetchError, Message};

// ---------------------------------------------------------------------------
// Policy
// ---------------------------------------------------------------------------

/// Timing constants for adaptive polling.
#[derive(Debug, Clone, PartialEq)]
pub struct PollingPolicy {
    pub min_delay_ms: u64,
    pub max_delay_ms: u64,
    pub idle_timeout_ms: u64,
    /// Multiplier applied after an empty fetch.
    pub empty_growth: f64,
    /// Multiplier applied after a failed fetch.
    pub failure_growth: f64,
}

impl Default for PollingPolicy {
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

impl PollingPolicy {
    /// Repair an inconsistent policy: `max >= min >= 1`, growth factors
    /// at least 1.
    pub fn normalized(mut self) -> Self {
        self.min_delay_ms = self.min_delay_ms.max(1);
        self.max_delay_ms = self.max_delay_ms.max(self.min_delay_ms);
        if self.empty_growth.is_nan() || self.empty_growth < 1.0 {
            self.empty_growth = 1.0;
        }
        if self.failure_growth.is_nan() || self.failure_growth < 1.0 {
            self.failure_growth = 1.0;
        }
        self
    }

    pub fn idle_timeout(&self) -> Duration {
        Duration::from_millis(self.idle_timeout_ms)
    }
}

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

/// Snapshot of the scheduler's own state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollState {
    pub is_polling: bool,
    pub current_delay_ms: u64,
    pub is_idle: bool,
}

/// The three gating signals. Foreground and online are driven from
/// outside; `is_idle` is set by the scheduler's own idle timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivitySignal {
    pub is_foreground: bool,
    pub is_online: bool,
    pub is_idle: bool,
}

impl Default for ActivitySignal {
    fn default() -> Self {
        Self {
            is_foreground: true,
            is_online: true,
            is_idle: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Fetch lifecycle
// ---------------------------------------------------------------------------

/// Result of one completed fetch attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    GotMessages(Vec<Message>),
    Empty,
    Failed(FetchError),
}

/// Identifies an issued fetch. `epoch` changes on every `start()`, so a
/// ticket from an earlier polling run marks its outcome as stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    pub epoch: u64,
    /// Fetch messages with an id greater than this.
    pub after: u64,
}

/// Gating signal that blocked a fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    NotPolling,
    Background,
    Offline,
    Idle,
}

/// Why a due poll did not issue a fetch. Not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// A gating signal is unfavorable; the matching signal handler resumes
    /// polling later.
    Gated(Gate),
    /// The previous fetch has not settled; its outcome schedules the next
    /// poll.
    InFlight,
}

/// What the caller should do when the poll timer fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollDecision {
    Fetch(FetchTicket),
    Skip(SkipReason),
}

/// How an outcome was consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeDisposition {
    /// Outcome applied; `rendered` new messages were shown and the next poll
    /// (if still polling) is due after `next_delay_ms`.
    Applied { rendered: usize, next_delay_ms: u64 },
    /// Outcome arrived after `stop()` or belongs to an earlier polling run.
    Discarded,
}
