//! Translate raw environment events into session signals.

use tracing::debug;

use crate::session::SessionHandle;

/// An environment event as the host observes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawSignal {
    /// Any user input: a keystroke, a submitted line, a click.
    Input,
    Hidden,
    Shown,
    Offline,
    Online,
}

/// Forwards raw events to a session.
#[derive(Clone)]
pub struct SignalObserver {
    session: SessionHandle,
}

impl SignalObserver {
    pub fn new(session: SessionHandle) -> Self {
        Self { session }
    }

    pub async fn relay(&self, signal: RawSignal) {
        debug!(?signal, "environment signal");
        match signal {
            RawSignal::Input => self.session.activity().await,
            RawSignal::Hidden => self.session.set_foreground(false).await,
            RawSignal::Shown => self.session.set_foreground(true).await,
            RawSignal::Offline => self.session.set_online(false).await,
            RawSignal::Online => self.session.set_online(true).await,
        }
    }

    /// Whether the session behind this observer has ended.
    pub fn is_closed(&self) -> bool {
        self.session.is_closed()
    }
}
