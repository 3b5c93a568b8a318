use thiserror::Error;

/// Errors that can occur during image URL resolution
#[derive(Debug, Error)]
pub enum ArtworkError {
    /// Upstream resolution failed (network, backend rejection)
    #[error("image resolution failed: {0}")]
    Resolution(String),

    /// The in-flight resolution this caller was waiting on went away
    #[error("image resolution cancelled")]
    Cancelled,

    /// The key carries no picture id to resolve
    #[error("track has no picture id")]
    MissingPicId,
}

/// Result type for artwork operations
pub type Result<T> = std::result::Result<T, ArtworkError>;
