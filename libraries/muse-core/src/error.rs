/// Core error types for Muse Player
use thiserror::Error;

/// Result type alias using `MuseError`
pub type Result<T> = std::result::Result<T, MuseError>;

/// Core error type for Muse Player
#[derive(Error, Debug)]
pub enum MuseError {
    /// Index outside the valid range of a queue or playlist
    #[error("Index {index} out of range (len {len})")]
    IndexOutOfRange {
        /// The rejected index
        index: usize,
        /// Length of the collection at the time of the access
        len: usize,
    },

    /// Entity not found (track, playlist, cache key)
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Kind of entity that was looked up
        entity: String,
        /// Identifier used for the lookup
        id: String,
    },

    /// Upstream API unreachable or returned an error
    #[error("Network error: {0}")]
    Network(String),

    /// Media pipeline could not load or play a resolved URL
    #[error("Media load error: {0}")]
    MediaLoad(String),

    /// An upstream resolution did not complete in time
    #[error("Resolution timed out")]
    ResolutionTimeout,

    /// Storage-related errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

impl MuseError {
    /// Create an index-out-of-range error
    pub fn index_out_of_range(index: usize, len: usize) -> Self {
        Self::IndexOutOfRange { index, len }
    }

    /// Create a not found error
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Create a network error
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    /// Create a media load error
    pub fn media_load(msg: impl Into<String>) -> Self {
        Self::MediaLoad(msg.into())
    }

    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_error_formats_bounds() {
        let err = MuseError::index_out_of_range(5, 3);
        assert_eq!(err.to_string(), "Index 5 out of range (len 3)");
    }

    #[test]
    fn not_found_names_entity() {
        let err = MuseError::not_found("Playlist", "abc");
        assert_eq!(err.to_string(), "Playlist not found: abc");
    }
}
