//! Adaptive poll scheduler.
//!
//! A state machine that keeps at most one fetch outstanding, grows the
//! delay between fetches while the conversation is quiet or the store is
//! failing, and resets it as soon as data arrives or the user is active.
//! Polling is gated on three signals: foreground, online, and not idle.

mod backoff;
#[allow(clippy::module_inception)]
mod scheduler;
mod types;


pub use backoff::{grow_delay, Backoff};
pub use scheduler::PollScheduler;
pub use types::{
    ActivitySignal, FetchOutcome, FetchTicket, Gate, OutcomeDisposition, PollDecision, PollState,
    PollingPolicy, SkipReason,
};
