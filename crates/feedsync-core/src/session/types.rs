//! Command and completion messages for the session task.

use feedsync_common::{PendingId, SendError, SendReceipt};

use crate::scheduler::{FetchOutcome, FetchTicket};

/// Commands sent to the session task from handles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SessionCommand {
    Activity,
    Visibility(bool),
    Connectivity(bool),
    Send(String),
    Shutdown,
}

/// Background I/O that finished and needs to be folded into state.
#[derive(Debug)]
pub(crate) enum Settled {
    Fetch {
        ticket: FetchTicket,
        outcome: FetchOutcome,
    },
    Send {
        pending: PendingId,
        result: Result<SendReceipt, SendError>,
    },
}
