//! Display contract and the shared "deliver unseen messages" step.

use feedsync_common::{Message, PendingId};
use tracing::debug;

use super::HighWaterMark;

/// Something that shows messages to the user.
///
/// Implementations record which ids they have shown but do not guard
/// against duplicates themselves: callers check [`has_rendered`] first.
///
/// [`has_rendered`]: FeedRenderer::has_rendered
pub trait FeedRenderer {
    fn has_rendered(&self, id: u64) -> bool;

    /// Append a confirmed message.
    fn render(&mut self, message: &Message);

    /// Append an optimistic echo of a message the user is sending.
    fn render_pending(&mut self, draft: &Message) -> PendingId;

    /// Remove an optimistic echo once the store confirmed it.
    fn retract_pending(&mut self, pending: &PendingId);

    /// Flag an optimistic echo whose send failed.
    fn mark_failed(&mut self, pending: &PendingId, reason: &str);

    /// Show or hide the "bot is typing" indicator.
    fn set_typing(&mut self, _visible: bool) {}
}

/// Render every message in `messages` whose id has not been shown yet and
/// advance `cursor` past it. Returns the number of messages rendered.
///
/// Messages without an id are not store-confirmed and are skipped.
pub fn deliver_unseen<R>(messages: &[Message], cursor: &mut HighWaterMark, renderer: &mut R) -> usize
where
    R: FeedRenderer + ?Sized,
{
    let mut rendered = 0;
    for message in messages {
        let Some(id) = message.id else {
            debug!("skipping unconfirmed message in store batch");
            continue;
        };
        if !renderer.has_rendered(id) {
            renderer.render(message);
            rendered += 1;
        }
        cursor.advance(id);
    }
    rendered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::FeedLog;
    use feedsync_common::Sender;

    fn msg(id: Option<u64>, text: &str) -> Message {
        Message {
            id,
            sender: Sender::Bot,
            text: text.into(),
            timestamp: String::new(),
        }
    }

    #[test]
    fn renders_each_id_once() {
        let mut log = FeedLog::default();
        let mut cursor = HighWaterMark::new();

        let first = deliver_unseen(&[msg(Some(1), "a"), msg(Some(2), "b")], &mut cursor, &mut log);
        let again = deliver_unseen(&[msg(Some(2), "b"), msg(Some(3), "c")], &mut cursor, &mut log);

        assert_eq!(first, 2);
        assert_eq!(again, 1);
        assert_eq!(log.len(), 3);
        assert_eq!(cursor.get(), 3);
    }

    #[test]
    fn out_of_order_batch_keeps_max_id() {
        let mut log = FeedLog::default();
        let mut cursor = HighWaterMark::new();
        deliver_unseen(&[msg(Some(9), "late"), msg(Some(4), "early")], &mut cursor, &mut log);
        assert_eq!(cursor.get(), 9);
    }

    #[test]
    fn skips_unconfirmed_messages() {
        let mut log = FeedLog::default();
        let mut cursor = HighWaterMark::new();
        let n = deliver_unseen(&[msg(None, "draft")], &mut cursor, &mut log);
        assert_eq!(n, 0);
        assert!(log.is_empty());
        assert_eq!(cursor.get(), 0);
    }
}
