//! Search/resolve API collaborator
//!
//! The network API manager is a black box to this core: the engine and the
//! caches only see this trait. Implementations live with the platform.

use crate::error::Result;
use crate::types::{MusicSource, Track};
use async_trait::async_trait;

/// A resolved playback URL with its negotiated quality
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StreamUrl {
    /// Direct media URL
    pub url: String,
    /// Actual bitrate in kbps (may be lower than requested)
    pub bitrate: u32,
    /// Media size in bytes, when the backend reports it
    pub size: Option<u64>,
}

/// Lyrics with an optional translation line-set
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Lyrics {
    /// Raw (timestamped) lyrics text
    pub text: String,
    /// Translated lyrics, when available
    pub translation: Option<String>,
}

/// Asynchronous search and resolution against the music source backends.
///
/// All operations are non-blocking and fail with a typed `MuseError`
/// (`Network`, `NotFound`, or `ResolutionTimeout`).
#[async_trait]
pub trait MusicApi: Send + Sync {
    /// Search for tracks by keyword
    async fn search(
        &self,
        keyword: &str,
        source: Option<MusicSource>,
        count: u32,
        pages: u32,
    ) -> Result<Vec<Track>>;

    /// Resolve the playback URL for a track at the requested bitrate
    async fn stream_url(
        &self,
        track_id: &str,
        source: Option<MusicSource>,
        bitrate: u32,
    ) -> Result<StreamUrl>;

    /// Resolve an image reference to a URL at the requested pixel size
    async fn image_url(
        &self,
        pic_id: &str,
        source: Option<MusicSource>,
        size: u32,
    ) -> Result<String>;

    /// Fetch lyrics by lyric reference id
    async fn lyrics(&self, lyric_id: &str, source: Option<MusicSource>) -> Result<Lyrics>;
}
