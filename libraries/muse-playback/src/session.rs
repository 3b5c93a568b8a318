//! Playback session bookkeeping
//!
//! Time, duration, buffer, and flags for the track currently under the
//! cursor. Reset on stop or track switch, preserved across pause/resume.

use serde::{Deserialize, Serialize};

/// Session state for the current track
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    /// Whether playback is running
    pub is_playing: bool,

    /// Playback position in seconds (>= 0)
    pub current_time: f64,

    /// Total duration in seconds; 0 until the media reports one
    pub total_time: f64,

    /// Buffered fraction of the media, 0.0..=1.0
    pub buffered_progress: f32,

    /// Whether the picture-in-picture surface is active
    pub pip_active: bool,
}

impl SessionState {
    /// Normalized progress fraction; 0.0 while the duration is unknown
    pub fn progress(&self) -> f32 {
        if self.total_time > 0.0 {
            (self.current_time / self.total_time) as f32
        } else {
            0.0
        }
    }

    /// Return to "stopped, time 0". The PiP flag is not playback state
    /// and survives the reset.
    pub fn reset(&mut self) {
        self.is_playing = false;
        self.current_time = 0.0;
        self.total_time = 0.0;
        self.buffered_progress = 0.0;
    }
}
