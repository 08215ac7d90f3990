//! Message store client.
//!
//! The store is reached over three request/response calls: the one-time
//! history load, incremental fetches after a cursor, and sends.

mod classify;
mod cookies;
mod http;

pub use classify::{classify_batch, classify_send_failure};
pub use cookies::cookie_value;
pub use http::{HttpStore, HttpStoreConfig};

use async_trait::async_trait;
use feedsync_common::{FetchError, Message, SendError, SendReceipt};

use crate::scheduler::FetchOutcome;

#[async_trait]
pub trait MessageStore: Send + Sync {
    /// Load the conversation so far (`GET /api/history`).
    async fn history(&self) -> Result<Vec<Message>, FetchError>;

    /// Fetch messages with an id greater than `after`
    /// (`GET /api/messages?after=<id>`).
    async fn fetch_since(&self, after: u64) -> FetchOutcome;

    /// Post a user message and receive the confirmed message plus the bot's
    /// reply (`POST /api/send`).
    async fn send(&self, text: &str) -> Result<SendReceipt, SendError>;
}
