pub mod errors;
pub mod id;
pub mod message;

pub use errors::{ConfigError, FeedsyncError, FetchError, SendError};
pub use id::{new_id, PendingId};
pub use message::{Message, MessageBatch, SendReceipt, SendRequest, Sender};

pub type Result<T> = std::result::Result<T, FeedsyncError>;
