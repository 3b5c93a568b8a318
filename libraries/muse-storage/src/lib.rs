//! Muse Storage - playback history and playlist persistence
//!
//! Library state is a pair of aggregates, the bounded history log and the
//! playlist collection, persisted whole as JSON documents through the
//! [`AggregateStore`](muse_core::AggregateStore) seam. [`MusicStore`] loads
//! them at open and writes through after every mutation; [`MemoryStore`]
//! and [`JsonFileStore`] are the two shipped backends.
//!
//! # Example
//!
//! ```no_run
//! use muse_storage::{JsonFileStore, MusicStore};
//! use std::sync::Arc;
//!
//! # async fn demo() -> muse_core::Result<()> {
//! let backend = Arc::new(JsonFileStore::open("/data/muse").await?);
//! let mut store = MusicStore::open(backend).await?;
//! let playlist = store.create_playlist("Favorites").await?;
//! println!("created {}", playlist.id);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

mod backend;
mod history;
mod store;

// Re-export public API
pub use backend::{JsonFileStore, MemoryStore};
pub use history::{HistoryLog, HISTORY_CAPACITY};
pub use store::MusicStore;
