//! Client-side message feed synchronizer.
//!
//! Keeps a local feed in step with a remote message store by polling.
//! [`scheduler::PollScheduler`] decides when to fetch, stretching the delay
//! while the conversation is quiet or the store is failing and pausing
//! entirely while the feed is in the background, the network is down, or
//! the user is idle. [`session::SessionHandle`] runs a scheduler against a
//! [`store::MessageStore`] and a [`feed::FeedRenderer`] on a tokio task.

pub mod feed;
pub mod observer;
pub mod probe;
pub mod scheduler;
pub mod session;
pub mod store;
pub mod timer;

pub use feed::{FeedLog, FeedLogConfig, FeedRenderer};
pub use observer::{RawSignal, SignalObserver};
pub use probe::ConnectivityProbe;
pub use scheduler::{ActivitySignal, FetchOutcome, PollScheduler, PollState, PollingPolicy};
pub use session::SessionHandle;
pub use store::{HttpStore, HttpStoreConfig, MessageStore};
