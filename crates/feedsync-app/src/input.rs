//! Stdin reader: lines become sends, slash commands become signals.

use feedsync_core::{RawSignal, SessionHandle, SignalObserver};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, warn};

/// What a line of input asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Send(String),
    Signal(RawSignal),
    Quit,
    /// Blank line: activity only.
    Nothing,
    Unknown(String),
}

pub fn parse_line(line: &str) -> Command {
    let line = line.trim();
    if line.is_empty() {
        return Command::Nothing;
    }
    match line {
        "/away" => Command::Signal(RawSignal::Hidden),
        "/back" => Command::Signal(RawSignal::Shown),
        "/offline" => Command::Signal(RawSignal::Offline),
        "/online" => Command::Signal(RawSignal::Online),
        "/quit" | "/exit" => Command::Quit,
        _ => match line.strip_prefix('/') {
            // `//text` sends a message that starts with a slash.
            Some(rest) if rest.starts_with('/') => Command::Send(rest.to_string()),
            Some(_) => Command::Unknown(line.to_string()),
            None => Command::Send(line.to_string()),
        },
    }
}

/// Read lines until EOF or `/quit`. Every line counts as user activity.
pub async fn run<R>(reader: R, session: &SessionHandle, observer: &SignalObserver)
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => {
                debug!("stdin closed");
                break;
            }
            Err(e) => {
                warn!(error = %e, "failed to read stdin");
                break;
            }
        };

        let command = parse_line(&line);
        if command == Command::Quit {
            break;
        }
        observer.relay(RawSignal::Input).await;
        match command {
            Command::Send(text) => session.send(text).await,
            Command::Signal(signal) => observer.relay(signal).await,
            Command::Unknown(cmd) => {
                eprintln!("unknown command {cmd} (try /away, /back, /offline, /online, /quit)")
            }
            Command::Nothing | Command::Quit => {}
        }
    }
}
