//! Session task: folds commands, timer fires and settled I/O into the
//! scheduler.

use std::sync::Arc;

use feedsync_common::FetchError;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use super::types::{SessionCommand, Settled};
use crate::feed::FeedRenderer;
use crate::scheduler::{
    ActivitySignal, FetchOutcome, FetchTicket, OutcomeDisposition, PollDecision, PollScheduler,
    PollingPolicy,
};
use crate::store::MessageStore;
use crate::timer::{TimerFired, TokioTimer};

pub(super) struct SessionDriver<S, R> {
    pub(super) scheduler: PollScheduler<TokioTimer>,
    pub(super) store: Arc<S>,
    pub(super) renderer: R,
    pub(super) settled_tx: mpsc::Sender<Settled>,
}

/// Run a session until shutdown or until every handle is dropped.
/// Returns the renderer.
pub(super) async fn session_loop<S, R>(
    store: Arc<S>,
    renderer: R,
    policy: PollingPolicy,
    signals: ActivitySignal,
    mut command_rx: mpsc::Receiver<SessionCommand>,
) -> R
where
    S: MessageStore + 'static,
    R: FeedRenderer + Send + 'static,
{
    let (timer, mut fired_rx) = TokioTimer::new();
    let (settled_tx, mut settled_rx) = mpsc::channel(64);
    let mut driver = SessionDriver {
        scheduler: PollScheduler::new(policy, signals, timer),
        store,
        renderer,
        settled_tx,
    };

    driver.load_history().await;
    driver.scheduler.start();
    driver.scheduler.on_activity();

    loop {
        tokio::select! {
            command = command_rx.recv() => match command {
                Some(SessionCommand::Shutdown) | None => break,
                Some(command) => driver.handle_command(command),
            },
            Some(fired) = fired_rx.recv() => driver.handle_timer(fired),
            Some(settled) = settled_rx.recv() => driver.handle_settled(settled),
        }
    }

    driver.scheduler.shutdown();
    info!(
        high_water_mark = driver.scheduler.high_water_mark(),
        "feed session stopped"
    );
    driver.renderer
}

impl<S, R> SessionDriver<S, R>
where
    S: MessageStore + 'static,
    R: FeedRenderer + Send + 'static,
{
    /// Initial history load. A failure leaves the feed empty and polling
    /// starts from zero.
    async fn load_history(&mut self) {
        match self.store.history().await {
            Ok(messages) => {
                self.scheduler.seed_history(&messages, &mut self.renderer);
            }
            Err(e) => warn!(error = %e, "failed to load history"),
        }
    }

    fn handle_command(&mut self, command: SessionCommand) {
        match command {
            SessionCommand::Activity => self.scheduler.on_activity(),
            SessionCommand::Visibility(is_foreground) => {
                self.scheduler.on_visibility_change(is_foreground)
            }
            SessionCommand::Connectivity(is_online) => {
                self.scheduler.on_connectivity_change(is_online)
            }
            SessionCommand::Send(text) => self.begin_send(&text),
            SessionCommand::Shutdown => {}
        }
    }

    fn handle_timer(&mut self, fired: TimerFired) {
        if !self.scheduler.timer_mut().acknowledge(fired) {
            debug!(slot = ?fired.slot, "ignoring superseded timer");
            return;
        }
        if let Some(PollDecision::Fetch(ticket)) = self.scheduler.on_timer(fired.slot) {
            self.spawn_fetch(ticket);
        }
    }

    fn spawn_fetch(&self, ticket: FetchTicket) {
        let store = Arc::clone(&self.store);
        let settled_tx = self.settled_tx.clone();
        tokio::spawn(async move {
            // A panicking store call must still settle the ticket.
            let fetch = tokio::spawn(async move { store.fetch_since(ticket.after).await });
            let outcome = match fetch.await {
                Ok(outcome) => outcome,
                Err(e) => {
                    warn!(error = %e, after = ticket.after, "fetch task failed");
                    FetchOutcome::Failed(FetchError::Transport(format!(
                        "fetch task failed: {e}"
                    )))
                }
            };
            let _ = settled_tx.send(Settled::Fetch { ticket, outcome }).await;
        });
    }

    fn handle_settled(&mut self, settled: Settled) {
        match settled {
            Settled::Fetch { ticket, outcome } => {
                let disposition = self
                    .scheduler
                    .on_fetch_outcome(ticket, outcome, &mut self.renderer);
                if let OutcomeDisposition::Applied { next_delay_ms, .. } = disposition {
                    debug!(next_delay_ms, "next poll scheduled");
                }
            }
            Settled::Send { pending, result } => self.finish_send(&pending, result),
        }
    }
}
