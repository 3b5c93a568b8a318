//! Platform media pipeline trait
//!
//! Abstracts the underlying media player (AVPlayer on iOS, ExoPlayer on
//! Android, a test double in tests). The controller never touches media
//! directly; it drives this trait and polls it from `tick()`.

use crate::error::Result;
use muse_core::types::Track;

/// Platform-agnostic media pipeline.
///
/// `load` begins (possibly asynchronous) preparation of a track and must
/// cancel any preparation still in flight for a previous track. Platforms
/// whose load completes asynchronously report the outcome through
/// [`PlayerController::complete_load`](crate::PlayerController::complete_load)
/// together with the generation they observed when the load started; the
/// controller discards stale completions.
pub trait MediaPipeline: Send {
    /// Begin loading `track`, cancelling any in-flight load
    fn load(&mut self, track: &Track) -> Result<()>;

    /// Start or resume playback of the loaded media
    fn play(&mut self) -> Result<()>;

    /// Pause playback, keeping the position
    fn pause(&mut self) -> Result<()>;

    /// Halt playback and discard the loaded media
    fn stop(&mut self);

    /// Seek to `seconds` from the start of the media
    fn seek(&mut self, seconds: f64) -> Result<()>;

    /// Current playback position in seconds
    fn current_time(&self) -> f64;

    /// Total duration in seconds; 0 while unknown
    fn duration(&self) -> f64;

    /// Buffered fraction of the media, 0.0..=1.0
    fn buffered_fraction(&self) -> f32;

    /// Whether the loaded media has played to its end
    fn is_finished(&self) -> bool;
}

/// A pipeline that accepts every command and plays nothing.
///
/// Useful for doc examples and platforms that wire the real pipeline later.
#[derive(Debug, Default)]
pub struct NullPipeline {
    loaded: bool,
    playing: bool,
    position: f64,
}

impl MediaPipeline for NullPipeline {
    fn load(&mut self, _track: &Track) -> Result<()> {
        self.loaded = true;
        self.position = 0.0;
        Ok(())
    }

    fn play(&mut self) -> Result<()> {
        self.playing = self.loaded;
        Ok(())
    }

    fn pause(&mut self) -> Result<()> {
        self.playing = false;
        Ok(())
    }

    fn stop(&mut self) {
        self.loaded = false;
        self.playing = false;
        self.position = 0.0;
    }

    fn seek(&mut self, seconds: f64) -> Result<()> {
        self.position = seconds;
        Ok(())
    }

    fn current_time(&self) -> f64 {
        self.position
    }

    fn duration(&self) -> f64 {
        0.0
    }

    fn buffered_fraction(&self) -> f32 {
        0.0
    }

    fn is_finished(&self) -> bool {
        false
    }
}
