use muse_core::types::Track;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Most entries kept; older plays fall off the tail
pub const HISTORY_CAPACITY: usize = 100;

/// Bounded, most-recent-first log of played tracks.
///
/// Replaying a track already in the log promotes it to the front instead
/// of duplicating it, so the log stays a ranking of distinct recent plays.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HistoryLog {
    entries: VecDeque<Track>,
}

impl HistoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a play. Identity is the `(track_id, source)` pair, so the
    /// same track refreshed with new metadata still counts as one entry.
    pub fn record(&mut self, track: Track) {
        if let Some(existing) = self.entries.iter().position(|entry| *entry == track) {
            self.entries.remove(existing);
        }
        self.entries.push_front(track);
        self.entries.truncate(HISTORY_CAPACITY);
    }

    /// Entries from most recent to oldest
    pub fn tracks(&self) -> impl Iterator<Item = &Track> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
