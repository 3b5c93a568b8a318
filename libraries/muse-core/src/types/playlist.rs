/// Playlist domain type
use crate::error::{MuseError, Result};
use crate::types::{PlaylistId, Track};
use chrono::Local;
use serde::{Deserialize, Serialize};

/// A named, ordered, user-editable collection of tracks.
///
/// Duplicates are allowed. `total_count` is derived from the track sequence
/// after every mutation and is never set independently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Playlist {
    /// Unique playlist identifier
    pub id: PlaylistId,

    /// Display name
    pub name: String,

    /// Creation timestamp, formatted `YYYY-MM-dd HH:mm:ss`
    pub created_at: String,

    /// Ordered track sequence
    pub tracks: Vec<Track>,

    /// Derived count, always equal to `tracks.len()`
    pub total_count: usize,
}

impl Playlist {
    /// Create a new empty playlist with a generated id and timestamp
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: PlaylistId::generate(),
            name: name.into(),
            created_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            tracks: Vec::new(),
            total_count: 0,
        }
    }

    /// Append a track (duplicates allowed)
    pub fn push_track(&mut self, track: Track) {
        self.tracks.push(track);
        self.sync_count();
    }

    /// Remove every occurrence of a track by identity
    ///
    /// Returns the number of occurrences removed.
    pub fn remove_track(&mut self, track: &Track) -> usize {
        let before = self.tracks.len();
        self.tracks.retain(|t| t != track);
        self.sync_count();
        before - self.tracks.len()
    }

    /// Remove the track at `index`, failing with `IndexOutOfRange` when invalid
    pub fn remove_track_at(&mut self, index: usize) -> Result<Track> {
        if index >= self.tracks.len() {
            return Err(MuseError::index_out_of_range(index, self.tracks.len()));
        }
        let track = self.tracks.remove(index);
        self.sync_count();
        Ok(track)
    }

    /// Re-derive `total_count` from the track sequence
    fn sync_count(&mut self) {
        self.total_count = self.tracks.len();
    }

    /// Check the count invariant (used by storage before persisting)
    pub fn count_is_consistent(&self) -> bool {
        self.total_count == self.tracks.len()
    }
}
