//! The poll scheduler state machine.

use std::time::Duration;

use feedsync_common::Message;
use tracing::{debug, info, warn};

use crate::feed::{deliver_unseen, FeedRenderer, HighWaterMark};
use crate::timer::{Timer, TimerSlot};

use super::backoff::{grow_delay, Backoff};
use super::types::{
    ActivitySignal, FetchOutcome, FetchTicket, Gate, OutcomeDisposition, PollDecision, PollState,
    PollingPolicy, SkipReason,
};

/// Decides whether and when the next fetch happens.
///
/// Every public method is one named transition. The scheduler never
/// performs I/O: it arms timers through `T` and hands out [`FetchTicket`]s
/// for the caller to execute.
pub struct PollScheduler<T: Timer> {
    policy: PollingPolicy,
    timer: T,
    is_polling: bool,
    current_delay_ms: u64,
    pub(super) signals: ActivitySignal,
    cursor: HighWaterMark,
    /// Bumped on every `start()`.
    epoch: u64,
    in_flight: Option<FetchTicket>,
}

impl<T: Timer> PollScheduler<T> {
    pub fn new(policy: PollingPolicy, signals: ActivitySignal, timer: T) -> Self {
        let policy = policy.normalized();
        Self {
            current_delay_ms: policy.min_delay_ms,
            policy,
            timer,
            is_polling: false,
            signals,
            cursor: HighWaterMark::new(),
            epoch: 0,
            in_flight: None,
        }
    }

    // -- accessors ----------------------------------------------------------

    pub fn state(&self) -> PollState {
        PollState {
            is_polling: self.is_polling,
            current_delay_ms: self.current_delay_ms,
            is_idle: self.signals.is_idle,
        }
    }

    pub fn signals(&self) -> ActivitySignal {
        self.signals
    }

    pub fn policy(&self) -> &PollingPolicy {
        &self.policy
    }

    pub fn high_water_mark(&self) -> u64 {
        self.cursor.get()
    }

    pub fn in_flight(&self) -> Option<FetchTicket> {
        self.in_flight
    }

    pub fn timer(&self) -> &T {
        &self.timer
    }

    pub fn timer_mut(&mut self) -> &mut T {
        &mut self.timer
    }

    // -- polling on/off -----------------------------------------------------

    /// Begin polling with the minimum delay. No-op while already polling.
    pub fn start(&mut self) {
        if self.is_polling {
            return;
        }
        self.is_polling = true;
        self.current_delay_ms = self.policy.min_delay_ms;
        self.epoch += 1;
        debug!(epoch = self.epoch, "polling started");
        self.schedule_poll();
    }

    /// Stop polling and disarm the poll timer. An in-flight fetch keeps
    /// running; its outcome will be discarded.
    pub fn stop(&mut self) {
        if self.is_polling {
            debug!(epoch = self.epoch, "polling stopped");
        }
        self.is_polling = false;
        self.timer.cancel(TimerSlot::Poll);
    }

    /// Disarm every timer. Used on teardown.
    pub fn shutdown(&mut self) {
        self.stop();
        self.timer.cancel(TimerSlot::Idle);
    }

    // -- environment signals ------------------------------------------------

    /// User activity: leave idle, reset the delay, resume if allowed, and
    /// restart the idle countdown.
    pub fn on_activity(&mut self) {
        self.wake();
        self.timer
            .schedule(TimerSlot::Idle, self.policy.idle_timeout());
    }

    /// A message is being sent. Same as activity except the idle countdown
    /// is left alone.
    pub fn note_outgoing(&mut self) {
        self.wake();
    }

    fn wake(&mut self) {
        self.signals.is_idle = false;
        self.current_delay_ms = self.policy.min_delay_ms;
        if self.signals.is_foreground && self.signals.is_online && !self.is_polling {
            self.start();
        }
    }

    /// The idle countdown elapsed without activity.
    pub fn on_idle_timeout(&mut self) {
        info!("no activity for {}ms, pausing polling", self.policy.idle_timeout_ms);
        self.signals.is_idle = true;
        self.stop();
    }

    pub fn on_visibility_change(&mut self, is_foreground: bool) {
        self.signals.is_foreground = is_foreground;
        if !is_foreground {
            self.stop();
        } else if !self.signals.is_idle && self.signals.is_online {
            self.start();
        }
    }

    pub fn on_connectivity_change(&mut self, is_online: bool) {
        self.signals.is_online = is_online;
        if !is_online {
            self.stop();
        } else if self.signals.is_foreground && !self.signals.is_idle {
            self.start();
        }
    }

    // -- fetch lifecycle ----------------------------------------------------

    /// Dispatch a fired timer slot. Returns the poll decision for
    /// [`TimerSlot::Poll`].
    pub fn on_timer(&mut self, slot: TimerSlot) -> Option<PollDecision> {
        match slot {
            TimerSlot::Poll => Some(self.on_poll_due()),
            TimerSlot::Idle => {
                self.on_idle_timeout();
                None
            }
        }
    }

    /// The poll timer fired. Re-checks every gate before handing out a
    /// fetch; a gated poll changes nothing and is not rescheduled.
    pub fn on_poll_due(&mut self) -> PollDecision {
        if let Some(gate) = self.closed_gate() {
            debug!(?gate, "poll skipped");
            return PollDecision::Skip(SkipReason::Gated(gate));
        }
        if self.in_flight.is_some() {
            debug!("poll deferred, previous fetch still outstanding");
            return PollDecision::Skip(SkipReason::InFlight);
        }
        let ticket = FetchTicket {
            epoch: self.epoch,
            after: self.cursor.get(),
        };
        self.in_flight = Some(ticket);
        PollDecision::Fetch(ticket)
    }

    /// Consume the outcome of the fetch issued for `ticket`.
    pub fn on_fetch_outcome<R>(
        &mut self,
        ticket: FetchTicket,
        outcome: FetchOutcome,
        renderer: &mut R,
    ) -> OutcomeDisposition
    where
        R: FeedRenderer + ?Sized,
    {
        if self.in_flight == Some(ticket) {
            self.in_flight = None;
        }

        if !self.is_polling || ticket.epoch != self.epoch {
            debug!(
                ticket_epoch = ticket.epoch,
                epoch = self.epoch,
                "discarding stale fetch outcome"
            );
            // A poll that fell due while this fetch was outstanding was
            // skipped; pick it up now.
            if self.is_polling && self.in_flight.is_none() && !self.timer.is_pending(TimerSlot::Poll) {
                self.schedule_poll();
            }
            return OutcomeDisposition::Discarded;
        }

        let mut rendered = 0;
        match outcome {
            FetchOutcome::GotMessages(messages) if !messages.is_empty() => {
                rendered = deliver_unseen(&messages, &mut self.cursor, renderer);
                renderer.set_typing(false);
                self.current_delay_ms = self.policy.min_delay_ms;
                debug!(
                    received = messages.len(),
                    rendered,
                    high_water_mark = self.cursor.get(),
                    "new messages"
                );
            }
            FetchOutcome::GotMessages(_) | FetchOutcome::Empty => {
                self.current_delay_ms =
                    grow_delay(self.current_delay_ms, Backoff::Empty, &self.policy);
            }
            FetchOutcome::Failed(reason) => {
                self.current_delay_ms =
                    grow_delay(self.current_delay_ms, Backoff::Failure, &self.policy);
                warn!(error = %reason, delay_ms = self.current_delay_ms, "polling error");
            }
        }

        if self.is_polling {
            self.schedule_poll();
        }
        OutcomeDisposition::Applied {
            rendered,
            next_delay_ms: self.current_delay_ms,
        }
    }

    // -- history & send flow ------------------------------------------------

    /// Render the initial history load and seed the cursor from it.
    pub fn seed_history<R>(&mut self, messages: &[Message], renderer: &mut R) -> usize
    where
        R: FeedRenderer + ?Sized,
    {
        let rendered = deliver_unseen(messages, &mut self.cursor, renderer);
        info!(
            rendered,
            high_water_mark = self.cursor.get(),
            "history loaded"
        );
        rendered
    }

    /// Deliver messages the store confirmed in answer to a send.
    pub fn accept_confirmed<R>(&mut self, messages: &[Message], renderer: &mut R) -> usize
    where
        R: FeedRenderer + ?Sized,
    {
        deliver_unseen(messages, &mut self.cursor, renderer)
    }

    // -- internals ----------------------------------------------------------

    fn closed_gate(&self) -> Option<Gate> {
        if !self.is_polling {
            Some(Gate::NotPolling)
        } else if !self.signals.is_foreground {
            Some(Gate::Background)
        } else if !self.signals.is_online {
            Some(Gate::Offline)
        } else if self.signals.is_idle {
            Some(Gate::Idle)
        } else {
            None
        }
    }

    fn schedule_poll(&mut self) {
        if !self.is_polling {
            return;
        }
        self.timer.schedule(
            TimerSlot::Poll,
            Duration::from_millis(self.current_delay_ms),
        );
    }
}
