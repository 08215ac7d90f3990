//! The local view of the conversation: renderer contract, the in-memory
//! feed, and the fetch cursor.

mod cursor;
mod log;
mod renderer;

pub use cursor::HighWaterMark;
pub use log::{EntryState, FeedEntry, FeedLog, FeedLogConfig};
pub use renderer::{deliver_unseen, FeedRenderer};
