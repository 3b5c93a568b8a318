//! Playback queue and navigation resolution
//!
//! A flat ordered track sequence plus a cursor. All next/previous/finish
//! resolution lives here so the controller only orchestrates.

use crate::error::{PlayerError, Result};
use crate::types::PlaybackMode;
use muse_core::types::Track;
use rand::Rng;

/// The set of tracks currently eligible for playback navigation.
///
/// Invariant: `current < tracks.len()` whenever the cursor is set;
/// the cursor is `None` when the queue is empty or undefined.
#[derive(Debug, Clone, Default)]
pub struct PlayQueue {
    tracks: Vec<Track>,
    current: Option<usize>,
}

impl PlayQueue {
    /// Create a new empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of tracks in the queue
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Check if the queue is empty
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Current cursor position, if defined
    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    /// Track under the cursor, if any
    pub fn current_track(&self) -> Option<&Track> {
        self.current.and_then(|i| self.tracks.get(i))
    }

    /// Track at `index`
    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    /// All tracks in queue order
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Move the cursor, validating bounds
    pub fn set_current(&mut self, index: usize) -> Result<()> {
        if index >= self.tracks.len() {
            return Err(PlayerError::index_out_of_range(index, self.tracks.len()));
        }
        self.current = Some(index);
        Ok(())
    }

    /// Replace the track sequence; the cursor moves to `index` when given,
    /// otherwise becomes undefined
    pub fn replace(&mut self, tracks: Vec<Track>, index: Option<usize>) -> Result<()> {
        if let Some(i) = index {
            if i >= tracks.len() {
                return Err(PlayerError::index_out_of_range(i, tracks.len()));
            }
        }
        self.tracks = tracks;
        self.current = index;
        Ok(())
    }

    /// Drop the track sequence and cursor
    pub fn clear(&mut self) {
        self.tracks.clear();
        self.current = None;
    }

    /// Element-wise identity comparison against a candidate sequence
    pub fn same_tracks(&self, candidate: &[Track]) -> bool {
        self.tracks.len() == candidate.len()
            && self.tracks.iter().zip(candidate).all(|(a, b)| a == b)
    }

    /// Resolve the index an explicit "next" command should target.
    ///
    /// Returns `None` when there is no next track (end of a non-repeating
    /// sequential queue, or an empty/cursorless queue). RepeatOne behaves
    /// as Sequential here: the loop-in-place semantic only applies to the
    /// natural end-of-track transition (see [`finish_index`](Self::finish_index)).
    pub fn next_index(&self, mode: PlaybackMode) -> Option<usize> {
        let len = self.tracks.len();
        let current = self.current?;
        if len == 0 {
            return None;
        }

        match mode {
            PlaybackMode::Sequential | PlaybackMode::RepeatOne => {
                (current + 1 < len).then_some(current + 1)
            }
            PlaybackMode::RepeatAll => Some((current + 1) % len),
            PlaybackMode::Shuffle => Some(Self::random_other(current, len)),
        }
    }

    /// Resolve the index an explicit "previous" command should target.
    ///
    /// Returns `None` at the front of a non-repeating queue (stay on the
    /// first track). Shuffle draws independently of any play history.
    pub fn previous_index(&self, mode: PlaybackMode) -> Option<usize> {
        let len = self.tracks.len();
        let current = self.current?;
        if len == 0 {
            return None;
        }

        match mode {
            PlaybackMode::Sequential | PlaybackMode::RepeatOne => current.checked_sub(1),
            PlaybackMode::RepeatAll => Some((current + len - 1) % len),
            PlaybackMode::Shuffle => Some(Self::random_other(current, len)),
        }
    }

    /// Resolve the index to play after the current track finishes naturally.
    ///
    /// RepeatOne replays the current index; Sequential at the last index
    /// yields `None` (playback ends); everything else follows
    /// [`next_index`](Self::next_index).
    pub fn finish_index(&self, mode: PlaybackMode) -> Option<usize> {
        match mode {
            PlaybackMode::RepeatOne => self.current,
            _ => self.next_index(mode),
        }
    }

    /// A random index in `[0, len)` that differs from `current` when `len > 1`
    fn random_other(current: usize, len: usize) -> usize {
        if len <= 1 {
            return 0;
        }
        let drawn = rand::thread_rng().gen_range(0..len - 1);
        if drawn >= current {
            drawn + 1
        } else {
            drawn
        }
    }
}
