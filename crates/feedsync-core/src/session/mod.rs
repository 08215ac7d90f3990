//! Feed session: the single task that owns the scheduler.
//!
//! Environment signals and sends arrive as commands through a
//! [`SessionHandle`]; fetches and sends run in spawned tasks and report
//! back over a channel, so every state transition happens on the session
//! task.

mod driver;
mod handle;
mod send;
mod types;


pub use handle::SessionHandle;
#[cfg(test)]
pub(crate) use types::SessionCommand;
pub use send::draft_message;
