//! OS integration adapter traits
//!
//! Lock-screen (now-playing) and picture-in-picture surfaces are external
//! collaborators. The engine pushes state through these traits and keeps
//! nothing but a boolean for PiP observability; remote commands come back
//! in through the controller's ordinary public operations.

use muse_core::types::Track;

/// Lock-screen / system now-playing surface
pub trait NowPlayingAdapter: Send {
    /// Show `track` (and optionally its lyrics) on the system surface
    fn update_now_playing(&mut self, track: &Track, lyrics: Option<&str>);

    /// Refresh elapsed/total time on the system surface
    fn update_progress(&mut self, current_time: f64, duration: f64);

    /// Clear the system surface (playback stopped)
    fn clear(&mut self);
}

/// Picture-in-picture lyrics surface
pub trait PipAdapter: Send {
    /// Whether the platform supports PiP at all
    fn is_supported(&self) -> bool;

    /// Bring up the PiP surface
    fn start(&mut self);

    /// Tear down the PiP surface
    fn stop(&mut self);

    /// Whether the surface is currently up
    fn is_active(&self) -> bool;

    /// Show the lyric line active at `timestamp` seconds into the track
    fn update_lyric_line(&mut self, timestamp: f64, line: &str);
}
