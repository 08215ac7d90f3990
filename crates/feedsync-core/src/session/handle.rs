//! Public handle for interacting with a running feed session.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::driver::session_loop;
use super::types::SessionCommand;
use crate::feed::FeedRenderer;
use crate::scheduler::{ActivitySignal, PollingPolicy};
use crate::store::MessageStore;

/// Handle for interacting with a feed session.
///
/// All methods are non-blocking and send commands to the background
/// session task. Cloning is cheap; the session ends when `shutdown` is
/// called or every handle is dropped.
#[derive(Clone)]
pub struct SessionHandle {
    command_tx: mpsc::Sender<SessionCommand>,
}

impl SessionHandle {
    /// Start a session in a background task.
    ///
    /// Returns the handle and the task, which yields the renderer back when
    /// the session ends.
    pub fn spawn<S, R>(
        store: Arc<S>,
        renderer: R,
        policy: PollingPolicy,
        signals: ActivitySignal,
    ) -> (Self, JoinHandle<R>)
    where
        S: MessageStore + 'static,
        R: FeedRenderer + Send + 'static,
    {
        let (command_tx, command_rx) = mpsc::channel(64);
        let task = tokio::spawn(session_loop(store, renderer, policy, signals, command_rx));
        (Self { command_tx }, task)
    }

    #[cfg(test)]
    pub(crate) fn from_sender(command_tx: mpsc::Sender<SessionCommand>) -> Self {
        Self { command_tx }
    }

    /// Report user activity.
    pub async fn activity(&self) {
        let _ = self.command_tx.send(SessionCommand::Activity).await;
    }

    /// Report that the feed moved to the foreground or background.
    pub async fn set_foreground(&self, is_foreground: bool) {
        let _ = self
            .command_tx
            .send(SessionCommand::Visibility(is_foreground))
            .await;
    }

    /// Report network reachability.
    pub async fn set_online(&self, is_online: bool) {
        let _ = self
            .command_tx
            .send(SessionCommand::Connectivity(is_online))
            .await;
    }

    /// Send a message with optimistic local echo.
    pub async fn send(&self, text: impl Into<String>) {
        let _ = self
            .command_tx
            .send(SessionCommand::Send(text.into()))
            .await;
    }

    /// Stop polling and end the session.
    pub async fn shutdown(&self) {
        let _ = self.command_tx.send(SessionCommand::Shutdown).await;
    }

    /// Whether the session task has ended.
    pub fn is_closed(&self) -> bool {
        self.command_tx.is_closed()
    }
}
