//! Deterministic timer for driving the scheduler without real time.

use std::collections::HashMap;
use std::time::Duration;

use super::{Timer, TimerSlot};

/// Fake clock: time only moves when the caller advances it.
#[derive(Debug, Default)]
pub struct ManualTimer {
    now: Duration,
    deadlines: HashMap<TimerSlot, Duration>,
    requested: Vec<(TimerSlot, Duration)>,
}

impl ManualTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Time elapsed since the timer was created.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Time left until `slot` fires, if armed.
    pub fn remaining(&self, slot: TimerSlot) -> Option<Duration> {
        self.deadlines
            .get(&slot)
            .map(|deadline| deadline.saturating_sub(self.now))
    }

    /// Every `schedule` call so far, with the requested delay.
    pub fn requested(&self) -> &[(TimerSlot, Duration)] {
        &self.requested
    }

    /// Move time forward by `by` and return the slots that fired, earliest
    /// deadline first. Fired slots are disarmed.
    pub fn advance(&mut self, by: Duration) -> Vec<TimerSlot> {
        self.now += by;
        let mut due: Vec<(TimerSlot, Duration)> = self
            .deadlines
            .iter()
            .filter(|(_, deadline)| **deadline <= self.now)
            .map(|(slot, deadline)| (*slot, *deadline))
            .collect();
        due.sort_by_key(|(_, deadline)| *deadline);
        for (slot, _) in &due {
            self.deadlines.remove(slot);
        }
        due.into_iter().map(|(slot, _)| slot).collect()
    }

    /// Jump to the earliest armed deadline and fire that slot.
    pub fn advance_to_next(&mut self) -> Option<TimerSlot> {
        let (slot, deadline) = self
            .deadlines
            .iter()
            .min_by_key(|(_, deadline)| **deadline)
            .map(|(slot, deadline)| (*slot, *deadline))?;
        self.now = self.now.max(deadline);
        self.deadlines.remove(&slot);
        Some(slot)
    }
}

impl Timer for ManualTimer {
    fn schedule(&mut self, slot: TimerSlot, delay: Duration) {
        self.requested.push((slot, delay));
        self.deadlines.insert(slot, self.now + delay);
    }

    fn cancel(&mut self, slot: TimerSlot) {
        self.deadlines.remove(&slot);
    }

    fn is_pending(&self, slot: TimerSlot) -> bool {
        self.deadlines.contains_key(&slot)
    }
}
