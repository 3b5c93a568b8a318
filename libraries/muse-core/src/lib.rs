//! Muse Player Core
//!
//! Platform-agnostic core types, traits, and error handling for Muse Player.
//!
//! This crate provides the foundational building blocks shared by the
//! playback engine, the artwork cache, and the storage layer:
//! - **Domain Types**: `Track`, `Playlist`, `MusicSource`, `TrackKey`
//! - **Collaborator Traits**: `MusicApi` (search/resolve backend),
//!   `AggregateStore` (durable document storage)
//! - **Error Handling**: unified `MuseError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use muse_core::types::{MusicSource, Playlist, Track};
//!
//! let track = Track::new("1952570624", "Stars Align", MusicSource::Netease);
//!
//! let mut playlist = Playlist::new("Late Night");
//! playlist.push_track(track);
//! assert_eq!(playlist.total_count, 1);
//! ```

#![forbid(unsafe_code)]

pub mod api;
pub mod error;
pub mod store;
pub mod types;

// Re-export commonly used types
pub use api::{Lyrics, MusicApi, StreamUrl};
pub use error::{MuseError, Result};
pub use store::AggregateStore;
pub use types::{MusicSource, Playlist, PlaylistId, Track, TrackKey};
