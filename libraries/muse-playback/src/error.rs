//! Error types for the playback engine

use thiserror::Error;

/// Playback errors
#[derive(Debug, Error)]
pub enum PlayerError {
    /// Index outside the current queue
    #[error("Index {index} out of range (queue length {len})")]
    IndexOutOfRange {
        /// The rejected index
        index: usize,
        /// Queue length at the time of the request
        len: usize,
    },

    /// Queue is empty
    #[error("Queue is empty")]
    QueueEmpty,

    /// No track is currently selected
    #[error("No current track")]
    NoCurrentTrack,

    /// Pipeline could not load or play the track
    #[error("Media load error: {0}")]
    MediaLoad(String),

    /// Pipeline reported a playback error
    #[error("Pipeline error: {0}")]
    Pipeline(String),
}

impl PlayerError {
    /// Create an index-out-of-range error
    pub fn index_out_of_range(index: usize, len: usize) -> Self {
        Self::IndexOutOfRange { index, len }
    }
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlayerError>;
