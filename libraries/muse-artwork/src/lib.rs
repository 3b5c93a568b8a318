//! Muse Artwork - Cover image URL cache
//!
//! Resolving a cover URL means a round trip to the music backend, so this
//! crate caches resolved URLs per `(pic_id, source, size)` with a TTL and
//! coalesces concurrent lookups for the same key into one upstream call.
//!
//! # Example
//!
//! ```no_run
//! use muse_artwork::{ImageCache, ImageKey, ImageResolver, ImageSize};
//! use muse_core::types::MusicSource;
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! # async fn demo(resolver: Arc<dyn ImageResolver>) -> muse_artwork::Result<()> {
//! let cache = ImageCache::new(resolver, Duration::from_secs(600));
//! let key = ImageKey::new("109951163826775", MusicSource::Netease, ImageSize::Large);
//! let url = cache.image_url(&key).await?;
//! println!("cover: {url}");
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

mod cache;
mod error;
mod types;

// Re-export public API
pub use cache::{ApiResolver, ImageCache, ImageResolver};
pub use error::{ArtworkError, Result};
pub use types::{CacheStats, ImageKey, ImageSize};
