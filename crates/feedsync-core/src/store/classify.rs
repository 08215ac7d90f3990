//! Turning raw store responses into outcomes.

use feedsync_common::{FetchError, MessageBatch, SendError};

use crate::scheduler::FetchOutcome;

/// Classify a successfully fetched body.
pub fn classify_batch(body: &[u8]) -> FetchOutcome {
    match serde_json::from_slice::<MessageBatch>(body) {
        Ok(batch) if batch.messages.is_empty() => FetchOutcome::Empty,
        Ok(batch) => FetchOutcome::GotMessages(batch.messages),
        Err(e) => FetchOutcome::Failed(FetchError::MalformedResponse(e.to_string())),
    }
}

/// Build the error for a non-2xx send, preferring the store's own `error`
/// message over the raw body.
pub fn classify_send_failure(status: u16, body: &str) -> SendError {
    let detail = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(String::from))
        .unwrap_or_else(|| body.chars().take(200).collect());
    SendError::Rejected { status, detail }
}
