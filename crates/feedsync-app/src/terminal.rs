//! Line-oriented feed renderer for a terminal.

use std::io::Write;

use chrono::{DateTime, Local, NaiveDateTime, Utc};
use feedsync_common::{Message, PendingId, Sender};
use feedsync_core::{FeedLog, FeedLogConfig, FeedRenderer};
use tracing::warn;

/// Prints feed changes to `out` and keeps the feed in a [`FeedLog`].
///
/// A terminal cannot rewrite earlier lines, so a pending echo stays on
/// screen and the confirmed copy is printed below it.
pub struct TerminalRenderer<W: Write> {
    log: FeedLog,
    out: W,
    show_timestamps: bool,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(config: FeedLogConfig, show_timestamps: bool, out: W) -> Self {
        Self {
            log: FeedLog::new(config),
            out,
            show_timestamps,
        }
    }

    pub fn log(&self) -> &FeedLog {
        &self.log
    }

    #[cfg(test)]
    pub fn into_parts(self) -> (FeedLog, W) {
        (self.log, self.out)
    }

    fn format(&self, message: &Message) -> String {
        let who = match message.sender {
            Sender::User => "you",
            Sender::Bot => "bot",
            Sender::Other => "???",
        };
        match local_time(&message.timestamp).filter(|_| self.show_timestamps) {
            Some(time) => format!("[{time}] {who}: {}", message.text),
            None => format!("{who}: {}", message.text),
        }
    }

    fn emit(&mut self, line: &str) {
        if let Err(e) = writeln!(self.out, "{line}").and_then(|()| self.out.flush()) {
            warn!(error = %e, "failed to write to terminal");
        }
    }
}

/// `HH:MM` in local time. Timestamps without an offset are taken as UTC.
fn local_time(timestamp: &str) -> Option<String> {
    let utc = match DateTime::parse_from_rfc3339(timestamp) {
        Ok(dt) => dt.with_timezone(&Utc),
        Err(_) => NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%dT%H:%M:%S%.f")
            .ok()?
            .and_utc(),
    };
    Some(utc.with_timezone(&Local).format("%H:%M").to_string())
}

impl<W: Write> FeedRenderer for TerminalRenderer<W> {
    fn has_rendered(&self, id: u64) -> bool {
        self.log.has_rendered(id)
    }

    fn render(&mut self, message: &Message) {
        self.log.render(message);
        let line = self.format(message);
        self.emit(&line);
    }

    fn render_pending(&mut self, draft: &Message) -> PendingId {
        let pending = self.log.render_pending(draft);
        let line = format!("{} (sending)", self.format(draft));
        self.emit(&line);
        pending
    }

    fn retract_pending(&mut self, pending: &PendingId) {
        self.log.retract_pending(pending);
    }

    fn mark_failed(&mut self, pending: &PendingId, reason: &str) {
        self.log.mark_failed(pending, reason);
        self.emit(&format!("!! message not sent: {reason}"));
    }

    fn set_typing(&mut self, visible: bool) {
        if visible && !self.log.is_typing() {
            self.emit("bot is typing...");
        }
        self.log.set_typing(visible);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn msg(id: Option<u64>, sender: Sender, text: &str) -> Message {
        Message {
            id,
            sender,
            text: text.into(),
            timestamp: "2024-05-01T10:00:00+00:00".into(),
        }
    }

    fn renderer(show_timestamps: bool) -> TerminalRenderer<Vec<u8>> {
        TerminalRenderer::new(FeedLogConfig::default(), show_timestamps, Vec::new())
    }

    fn output(renderer: TerminalRenderer<Vec<u8>>) -> String {
        String::from_utf8(renderer.into_parts().1).unwrap()
    }

    #[test]
    fn prints_confirmed_messages() {
        let mut r = renderer(false);
        r.render(&msg(Some(1), Sender::User, "hi"));
        r.render(&msg(Some(2), Sender::Bot, "hello"));
        assert!(r.has_rendered(2));
        assert_eq!(output(r), "you: hi\nbot: hello\n");
    }

    #[test]
    fn timestamps_use_local_clock() {
        let mut r = renderer(true);
        r.render(&msg(Some(1), Sender::Bot, "hello"));
        let expected = local_time("2024-05-01T10:00:00+00:00").unwrap();
        assert_eq!(output(r), format!("[{expected}] bot: hello\n"));
    }

    #[test]
    fn naive_and_unparseable_timestamps() {
        assert!(local_time("2024-05-01T10:00:00.123456").is_some());
        assert!(local_time("yesterday").is_none());

        let mut r = renderer(true);
        let mut m = msg(Some(1), Sender::Bot, "hello");
        m.timestamp = String::new();
        r.render(&m);
        assert_eq!(output(r), "bot: hello\n");
    }

    #[test]
    fn pending_and_failed_echoes_are_marked() {
        let mut r = renderer(false);
        let pending = r.render_pending(&msg(None, Sender::User, "hi"));
        r.set_typing(true);
        r.set_typing(true);
        r.mark_failed(&pending, "send rejected (HTTP 403): forbidden");
        r.set_typing(false);
        assert!(r.log().find_pending(&pending).is_some());
        assert_eq!(
            output(r),
            "you: hi (sending)\nbot is typing...\n!! message not sent: send rejected (HTTP 403): forbidden\n"
        );
    }
}
