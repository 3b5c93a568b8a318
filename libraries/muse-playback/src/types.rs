//! Core types for the playback engine

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Next/previous resolution policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackMode {
    /// Play the queue front to back, stop at the end
    Sequential,

    /// Loop the entire queue
    RepeatAll,

    /// Replay the current track when it finishes naturally;
    /// explicit next/previous still advance sequentially
    RepeatOne,

    /// Random next/previous, avoiding an immediate repeat
    Shuffle,
}

/// Configuration for the player controller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerConfig {
    /// Initial playback mode (default: Sequential)
    pub mode: PlaybackMode,

    /// Interval the platform should drive [`tick`](crate::PlayerController::tick)
    /// at (default: 500ms)
    pub tick_interval: Duration,

    /// Past this position, "previous" restarts the current track instead
    /// of going back a track (default: 3s)
    pub restart_threshold: Duration,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            mode: PlaybackMode::Sequential,
            tick_interval: Duration::from_millis(500),
            restart_threshold: Duration::from_secs(3),
        }
    }
}
