//! Muse Player - Playback Engine
//!
//! Platform-agnostic playback management for Muse Player.
//!
//! This crate provides:
//! - Queue navigation (sequential, repeat-all, repeat-one, shuffle)
//! - Play/pause/stop/seek with progress and buffer bookkeeping
//! - Natural end-of-track handling per playback mode
//! - An event subscription registry for UI, lock-screen, and PiP observers
//! - Trait seams for the media pipeline and the OS integration surfaces
//!
//! # Architecture
//!
//! `muse-playback` is completely platform-agnostic: the underlying media
//! pipeline (AVPlayer, ExoPlayer, a test double) is provided via the
//! [`MediaPipeline`] trait, and OS surfaces (lock screen, picture in
//! picture) via adapter traits. There is exactly one live
//! [`PlayerController`] per process; every state mutation — user commands
//! and pipeline callbacks alike — goes through its `&mut self` operations,
//! which is the engine's single serialization point.
//!
//! # Example
//!
//! ```rust
//! use muse_core::types::{MusicSource, Track};
//! use muse_playback::{NullPipeline, PlaybackMode, PlayerConfig, PlayerController};
//!
//! let mut player = PlayerController::new(Box::new(NullPipeline::default()), PlayerConfig::default());
//!
//! let queue = vec![
//!     Track::new("1", "First", MusicSource::Netease),
//!     Track::new("2", "Second", MusicSource::Netease),
//! ];
//! player.play_queue(queue, 0).ok();
//! player.set_mode(PlaybackMode::RepeatAll);
//! player.play_next_track().ok();
//! assert_eq!(player.current_index(), Some(1));
//! ```

mod adapters;
mod error;
mod events;
mod pipeline;
mod player;
mod queue;
mod session;
pub mod types;

// Public exports
pub use adapters::{NowPlayingAdapter, PipAdapter};
pub use error::{PlayerError, Result};
pub use events::{PlayerEvent, SubscriptionId};
pub use pipeline::{MediaPipeline, NullPipeline};
pub use player::PlayerController;
pub use queue::PlayQueue;
pub use session::SessionState;
pub use types::{PlaybackMode, PlayerConfig};
