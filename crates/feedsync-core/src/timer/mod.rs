//! Single-shot, cancellable timers driving the poll scheduler.
//!
//! The scheduler owns two independent slots: the next poll and the idle
//! timeout. Scheduling a slot replaces whatever was pending in it.

mod manual;
mod tokio_timer;

pub use manual::ManualTimer;
pub use tokio_timer::{TimerFired, TokioTimer};

use std::time::Duration;

/// Which of the scheduler's timers an operation refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerSlot {
    /// Fires when the next fetch is due.
    Poll,
    /// Fires when no activity was seen for the idle timeout.
    Idle,
}

/// A delayed-callback service with one pending timer per slot.
pub trait Timer {
    /// Arm `slot` to fire after `delay`, replacing any pending timer in it.
    fn schedule(&mut self, slot: TimerSlot, delay: Duration);

    /// Disarm `slot`. No-op when nothing is pending.
    fn cancel(&mut self, slot: TimerSlot);

    fn is_pending(&self, slot: TimerSlot) -> bool;
}
