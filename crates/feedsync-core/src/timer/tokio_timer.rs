//! Timer backed by tokio sleep tasks.

use std::collections::HashMap;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::{Timer, TimerSlot};

/// Notification that an armed slot's delay elapsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerFired {
    pub slot: TimerSlot,
    pub generation: u64,
}

struct Armed {
    generation: u64,
    handle: JoinHandle<()>,
}

/// Timer that spawns one sleep task per armed slot and reports expiry on
/// an mpsc channel.
///
/// A fire can already sit in the channel when its slot is rescheduled or
/// cancelled; [`TokioTimer::acknowledge`] filters those out by generation.
pub struct TokioTimer {
    fired_tx: mpsc::Sender<TimerFired>,
    armed: HashMap<TimerSlot, Armed>,
    generation: u64,
}

impl TokioTimer {
    /// Create a timer and the receiver its fires are delivered on.
    pub fn new() -> (Self, mpsc::Receiver<TimerFired>) {
        let (fired_tx, fired_rx) = mpsc::channel(16);
        let timer = Self {
            fired_tx,
            armed: HashMap::new(),
            generation: 0,
        };
        (timer, fired_rx)
    }

    /// Returns `true` if `fired` belongs to the currently armed timer of its
    /// slot, disarming the slot. Stale fires return `false`.
    pub fn acknowledge(&mut self, fired: TimerFired) -> bool {
        match self.armed.get(&fired.slot) {
            Some(armed) if armed.generation == fired.generation => {
                self.armed.remove(&fired.slot);
                true
            }
            _ => false,
        }
    }
}

impl Timer for TokioTimer {
    fn schedule(&mut self, slot: TimerSlot, delay: Duration) {
        self.cancel(slot);
        self.generation += 1;
        let generation = self.generation;
        let tx = self.fired_tx.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(TimerFired { slot, generation }).await;
        });
        self.armed.insert(slot, Armed { generation, handle });
    }

    fn cancel(&mut self, slot: TimerSlot) {
        if let Some(armed) = self.armed.remove(&slot) {
            armed.handle.abort();
        }
    }

    fn is_pending(&self, slot: TimerSlot) -> bool {
        self.armed.contains_key(&slot)
    }
}

impl Drop for TokioTimer {
    fn drop(&mut self) {
        for (_, armed) in self.armed.drain() {
            armed.handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn fires_after_delay() {
        let (mut timer, mut rx) = TokioTimer::new();
        timer.schedule(TimerSlot::Poll, Duration::from_millis(1000));
        assert!(timer.is_pending(TimerSlot::Poll));

        let fired = rx.recv().await.unwrap();
        assert_eq!(fired.slot, TimerSlot::Poll);
        assert!(timer.acknowledge(fired));
        assert!(!timer.is_pending(TimerSlot::Poll));
    }

    #[tokio::test(start_paused = true)]
    async fn reschedule_supersedes_previous_fire() {
        let (mut timer, mut rx) = TokioTimer::new();
        timer.schedule(TimerSlot::Poll, Duration::from_millis(100));
        tokio::time::sleep(Duration::from_millis(150)).await;
        // The first fire is queued; rescheduling makes it stale.
        timer.schedule(TimerSlot::Poll, Duration::from_millis(500));

        let stale = rx.recv().await.unwrap();
        assert!(!timer.acknowledge(stale));
        assert!(timer.is_pending(TimerSlot::Poll));

        let fresh = rx.recv().await.unwrap();
        assert!(timer.acknowledge(fresh));
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_prevents_fire() {
        let (mut timer, mut rx) = TokioTimer::new();
        timer.schedule(TimerSlot::Idle, Duration::from_millis(100));
        timer.cancel(TimerSlot::Idle);
        assert!(!timer.is_pending(TimerSlot::Idle));

        let waited = tokio::time::timeout(Duration::from_secs(5), rx.recv()).await;
        assert!(waited.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn slots_are_independent() {
        let (mut timer, mut rx) = TokioTimer::new();
        timer.schedule(TimerSlot::Idle, Duration::from_millis(300));
        timer.schedule(TimerSlot::Poll, Duration::from_millis(100));
        timer.cancel(TimerSlot::Poll);

        let fired = rx.recv().await.unwrap();
        assert_eq!(fired.slot, TimerSlot::Idle);
        assert!(timer.acknowledge(fired));
    }
}
