//! Send flow: optimistic echo, store round trip, reconciliation.

use std::sync::Arc;

use feedsync_common::{Message, PendingId, SendError, SendReceipt, Sender};
use tracing::{debug, warn};

use super::driver::SessionDriver;
use super::types::Settled;
use crate::feed::FeedRenderer;
use crate::store::MessageStore;

/// Build the optimistic local echo for `text`.
///
/// Returns `None` for blank input. The draft has no id and is stamped with
/// the current time.
pub fn draft_message(text: &str) -> Option<Message> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    Some(Message {
        id: None,
        sender: Sender::User,
        text: text.to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

impl<S, R> SessionDriver<S, R>
where
    S: MessageStore + 'static,
    R: FeedRenderer + Send + 'static,
{
    pub(super) fn begin_send(&mut self, text: &str) {
        let Some(draft) = draft_message(text) else {
            debug!("ignoring blank message");
            return;
        };

        let pending = self.renderer.render_pending(&draft);
        self.renderer.set_typing(true);
        self.scheduler.note_outgoing();

        let store = Arc::clone(&self.store);
        let settled_tx = self.settled_tx.clone();
        let text = draft.text;
        tokio::spawn(async move {
            let send = tokio::spawn(async move { store.send(&text).await });
            let result = match send.await {
                Ok(result) => result,
                Err(e) => {
                    warn!(error = %e, "send task failed");
                    Err(SendError::Transport(format!("send task failed: {e}")))
                }
            };
            let _ = settled_tx.send(Settled::Send { pending, result }).await;
        });
    }

    pub(super) fn finish_send(
        &mut self,
        pending: &PendingId,
        result: Result<SendReceipt, SendError>,
    ) {
        self.renderer.set_typing(false);
        match result {
            Ok(receipt) => {
                self.renderer.retract_pending(pending);
                let confirmed = receipt.into_messages();
                let rendered = self
                    .scheduler
                    .accept_confirmed(&confirmed, &mut self.renderer);
                debug!(
                    rendered,
                    high_water_mark = self.scheduler.high_water_mark(),
                    "send confirmed"
                );
            }
            Err(e) => {
                warn!(error = %e, "failed to send message");
                self.renderer.mark_failed(pending, &e.to_string());
            }
        }
    }
}
