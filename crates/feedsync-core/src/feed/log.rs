//! In-memory conversation feed.
//!
//! Stores entries in a bounded ring buffer so memory usage stays
//! predictable. Rendered ids are remembered past eviction so a message the
//! store re-sends is still recognised as shown.

use std::collections::{HashSet, VecDeque};

use feedsync_common::{Message, PendingId};

use super::FeedRenderer;

/// Lifecycle of a feed entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryState {
    Confirmed,
    /// Optimistic echo awaiting the store's answer.
    Pending(PendingId),
    /// Optimistic echo whose send failed.
    Failed { pending: PendingId, reason: String },
}

/// A single line of the feed.
#[derive(Debug, Clone)]
pub struct FeedEntry {
    pub message: Message,
    pub state: EntryState,
}

impl FeedEntry {
    fn pending_id(&self) -> Option<&PendingId> {
        match &self.state {
            EntryState::Pending(pending) => Some(pending),
            EntryState::Failed { pending, .. } => Some(pending),
            EntryState::Confirmed => None,
        }
    }
}

/// Configuration for feed storage.
#[derive(Debug, Clone)]
pub struct FeedLogConfig {
    /// Maximum entries to retain. Bounds displayed entries only; the set of
    /// rendered ids is kept for the whole session.
    pub max_entries: usize,
}

impl Default for FeedLogConfig {
    fn default() -> Self {
        Self { max_entries: 500 }
    }
}

/// In-memory feed that implements [`FeedRenderer`].
pub struct FeedLog {
    config: FeedLogConfig,
    entries: VecDeque<FeedEntry>,
    /// Every id ever rendered, never trimmed, so a re-delivered id is
    /// recognised after its entry was evicted.
    rendered: HashSet<u64>,
    typing: bool,
}

impl FeedLog {
    pub fn new(config: FeedLogConfig) -> Self {
        Self {
            config,
            entries: VecDeque::new(),
            rendered: HashSet::new(),
            typing: false,
        }
    }

    /// Append an entry. The oldest entry is evicted when the buffer is full.
    fn push(&mut self, entry: FeedEntry) {
        if self.entries.len() >= self.config.max_entries.max(1) {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    /// Get the most recent `limit` entries (oldest first).
    pub fn recent(&self, limit: usize) -> Vec<&FeedEntry> {
        let skip = self.entries.len().saturating_sub(limit);
        self.entries.iter().skip(skip).collect()
    }

    pub fn entries(&self) -> impl Iterator<Item = &FeedEntry> {
        self.entries.iter()
    }

    /// Ids of confirmed entries currently retained, in display order.
    pub fn confirmed_ids(&self) -> Vec<u64> {
        self.entries
            .iter()
            .filter(|e| e.state == EntryState::Confirmed)
            .filter_map(|e| e.message.id)
            .collect()
    }

    pub fn find_pending(&self, pending: &PendingId) -> Option<&FeedEntry> {
        self.entries
            .iter()
            .find(|e| e.pending_id() == Some(pending))
    }

    pub fn is_typing(&self) -> bool {
        self.typing
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop all entries and forget rendered ids.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.rendered.clear();
    }
}

impl Default for FeedLog {
    fn default() -> Self {
        Self::new(FeedLogConfig::default())
    }
}

impl FeedRenderer for FeedLog {
    fn has_rendered(&self, id: u64) -> bool {
        self.rendered.contains(&id)
    }

    fn render(&mut self, message: &Message) {
        if let Some(id) = message.id {
            self.rendered.insert(id);
        }
        self.push(FeedEntry {
            message: message.clone(),
            state: EntryState::Confirmed,
        });
    }

    fn render_pending(&mut self, draft: &Message) -> PendingId {
        let pending = PendingId::new();
        self.push(FeedEntry {
            message: draft.clone(),
            state: EntryState::Pending(pending.clone()),
        });
        pending
    }

    fn retract_pending(&mut self, pending: &PendingId) {
        self.entries.retain(|e| e.pending_id() != Some(pending));
    }

    fn mark_failed(&mut self, pending: &PendingId, reason: &str) {
        if let Some(entry) = self
            .entries
            .iter_mut()
            .find(|e| e.pending_id() == Some(pending))
        {
            entry.state = EntryState::Failed {
                pending: pending.clone(),
                reason: reason.to_string(),
            };
        }
    }

    fn set_typing(&mut self, visible: bool) {
        self.typing = visible;
    }
}
