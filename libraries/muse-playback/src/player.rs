//! Player controller - core orchestration
//!
//! Owns the queue, the session, and the media pipeline; every mutation —
//! user command or pipeline callback — goes through these `&mut self`
//! operations, the engine's single serialization point.

use crate::{
    adapters::{NowPlayingAdapter, PipAdapter},
    error::{PlayerError, Result},
    events::{PlayerEvent, SubscriberRegistry, SubscriptionId},
    pipeline::MediaPipeline,
    queue::PlayQueue,
    session::SessionState,
    types::{PlaybackMode, PlayerConfig},
};
use muse_core::types::Track;
use std::time::Duration;

type HistorySink = Box<dyn FnMut(&Track) + Send>;
type EventListener = Box<dyn FnMut(&PlayerEvent) + Send>;

/// Central playback controller.
///
/// Orchestrates queue navigation, playback-mode semantics, session
/// bookkeeping, and event emission over a platform [`MediaPipeline`].
/// Exactly one instance lives per process, owned by the application's
/// composition root; tests construct fresh instances per case.
pub struct PlayerController {
    // State
    queue: PlayQueue,
    mode: PlaybackMode,
    session: SessionState,

    // Platform seams
    pipeline: Box<dyn MediaPipeline>,
    now_playing: Option<Box<dyn NowPlayingAdapter>>,
    pip: Option<Box<dyn PipAdapter>>,

    // History recording callback (storage layer wires itself in here)
    history_sink: Option<HistorySink>,

    // Observers
    subscribers: SubscriberRegistry,

    // Bumped on every track switch and stop; stale async load completions
    // carry an older generation and are discarded
    load_generation: u64,

    config: PlayerConfig,
}

impl PlayerController {
    /// Create a new controller over a platform pipeline
    pub fn new(pipeline: Box<dyn MediaPipeline>, config: PlayerConfig) -> Self {
        Self {
            queue: PlayQueue::new(),
            mode: config.mode,
            session: SessionState::default(),
            pipeline,
            now_playing: None,
            pip: None,
            history_sink: None,
            subscribers: SubscriberRegistry::new(),
            load_generation: 0,
            config,
        }
    }

    // ===== Wiring =====

    /// Register an event listener; the returned handle unsubscribes it
    pub fn subscribe(&mut self, listener: EventListener) -> SubscriptionId {
        self.subscribers.subscribe(listener)
    }

    /// Remove an event listener
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.unsubscribe(id)
    }

    /// Attach the lock-screen now-playing surface
    pub fn set_now_playing_adapter(&mut self, adapter: Box<dyn NowPlayingAdapter>) {
        self.now_playing = Some(adapter);
    }

    /// Attach the picture-in-picture surface
    pub fn set_pip_adapter(&mut self, adapter: Box<dyn PipAdapter>) {
        self.pip = Some(adapter);
    }

    /// Attach the history recording sink (called once per started track)
    pub fn set_history_sink(&mut self, sink: HistorySink) {
        self.history_sink = Some(sink);
    }

    // ===== Playlist management =====

    /// Replace the queue and start playing the track at `index`.
    ///
    /// When the candidate queue and index match the current ones
    /// element-wise, nothing is reloaded; a paused track resumes instead.
    pub fn play_queue(&mut self, tracks: Vec<Track>, index: usize) -> Result<()> {
        if self.is_same_playlist_and_track(&tracks, index) {
            return self.play();
        }
        if index >= tracks.len() {
            return Err(PlayerError::index_out_of_range(index, tracks.len()));
        }
        self.queue.replace(tracks, None)?;
        self.play_track_at_index(index)
    }

    /// Start playback of the queued track at `index`.
    ///
    /// Resets the session, cancels any in-flight load, drives the pipeline,
    /// records history, refreshes the lock screen, and emits
    /// `DidStartPlaying`.
    pub fn play_track_at_index(&mut self, index: usize) -> Result<()> {
        if index >= self.queue.len() {
            return Err(PlayerError::index_out_of_range(index, self.queue.len()));
        }
        self.queue.set_current(index)?;
        let track = self
            .queue
            .current_track()
            .cloned()
            .ok_or(PlayerError::NoCurrentTrack)?;

        self.load_generation += 1;
        self.session.reset();

        if let Err(err) = self.pipeline.load(&track) {
            return self.fail_playback(err.to_string());
        }
        if let Err(err) = self.pipeline.play() {
            return self.fail_playback(err.to_string());
        }

        self.session.is_playing = true;
        let duration = self.pipeline.duration();
        if duration > 0.0 {
            self.session.total_time = duration;
        }
        self.session.buffered_progress = self.pipeline.buffered_fraction().clamp(0.0, 1.0);

        if let Some(sink) = &mut self.history_sink {
            sink(&track);
        }
        if let Some(now_playing) = &mut self.now_playing {
            now_playing.update_now_playing(&track, None);
        }

        tracing::debug!(
            track_id = %track.track_id,
            source = %track.source,
            index,
            "starting playback"
        );
        self.subscribers
            .emit(&PlayerEvent::DidStartPlaying { track });
        Ok(())
    }

    /// Advance to the next track per the current mode.
    ///
    /// At the end of a non-repeating sequential queue playback stops
    /// (emitting `DidStop`) instead of wrapping; the cursor stays put.
    pub fn play_next_track(&mut self) -> Result<()> {
        match self.queue.next_index(self.mode) {
            Some(index) => self.play_track_at_index(index),
            None => {
                self.stop();
                Ok(())
            }
        }
    }

    /// Go back to the previous track per the current mode.
    ///
    /// Past the restart threshold, "previous" rewinds the current track to
    /// 0 instead. At the front of a non-repeating queue with nothing to
    /// rewind this is a no-op (stay on the first track).
    pub fn play_previous_track(&mut self) -> Result<()> {
        if self.queue.current_track().is_some()
            && self.session.current_time > self.config.restart_threshold.as_secs_f64()
        {
            return self.seek_to_time(0.0);
        }
        match self.queue.previous_index(self.mode) {
            Some(index) => self.play_track_at_index(index),
            None => Ok(()),
        }
    }

    /// True iff `candidate` matches the current queue element-wise and
    /// `index` matches the cursor — callers use this to skip redundant
    /// reloads.
    pub fn is_same_playlist_and_track(&self, candidate: &[Track], index: usize) -> bool {
        self.queue.current_index() == Some(index) && self.queue.same_tracks(candidate)
    }

    /// Swap the surrounding queue without touching playback.
    ///
    /// Used when the playlist context changes around the same playing
    /// track (view switched, recommendations refreshed). The session and
    /// the pipeline are left alone.
    pub fn update_playlist_only(&mut self, tracks: Vec<Track>, index: usize) -> Result<()> {
        self.queue.replace(tracks, Some(index))
    }

    // ===== Playback control =====

    /// Resume the current track without resetting time.
    /// No-op without a current track or when already playing.
    pub fn play(&mut self) -> Result<()> {
        if self.queue.current_track().is_none() || self.session.is_playing {
            return Ok(());
        }
        self.pipeline
            .play()
            .map_err(|e| PlayerError::Pipeline(e.to_string()))?;
        self.session.is_playing = true;
        self.subscribers.emit(&PlayerEvent::DidResume);
        self.push_lock_screen_progress();
        Ok(())
    }

    /// Pause the current track, keeping the position.
    /// No-op when nothing is playing.
    pub fn pause(&mut self) -> Result<()> {
        if !self.session.is_playing {
            return Ok(());
        }
        self.pipeline
            .pause()
            .map_err(|e| PlayerError::Pipeline(e.to_string()))?;
        self.session.is_playing = false;
        self.subscribers.emit(&PlayerEvent::DidPause);
        self.push_lock_screen_progress();
        Ok(())
    }

    /// Halt playback and reset the session to time 0.
    ///
    /// The queue and cursor are kept; any in-flight load is cancelled.
    /// `DidStop` is emitted once per actual transition.
    pub fn stop(&mut self) {
        self.load_generation += 1;
        let was_active = self.session.is_playing
            || self.session.current_time > 0.0
            || self.session.total_time > 0.0;

        self.pipeline.stop();
        self.session.reset();
        if let Some(now_playing) = &mut self.now_playing {
            now_playing.clear();
        }
        if was_active {
            self.subscribers.emit(&PlayerEvent::DidStop);
        }
    }

    // ===== Seek =====

    /// Seek to a normalized position; `progress` is clamped to `0.0..=1.0`
    pub fn seek_to_progress(&mut self, progress: f64) -> Result<()> {
        let progress = progress.clamp(0.0, 1.0);
        self.seek_to_time(progress * self.session.total_time)
    }

    /// Seek to `seconds`, clamped to `0.0..=total_time`
    pub fn seek_to_time(&mut self, seconds: f64) -> Result<()> {
        if self.queue.current_track().is_none() {
            return Err(PlayerError::NoCurrentTrack);
        }
        let clamped = seconds.clamp(0.0, self.session.total_time.max(0.0));
        self.pipeline
            .seek(clamped)
            .map_err(|e| PlayerError::Pipeline(e.to_string()))?;
        self.session.current_time = clamped;
        self.emit_progress();
        Ok(())
    }

    // ===== Pipeline callbacks =====

    /// Natural end-of-track dispatch, funneled here by the platform.
    ///
    /// RepeatOne replays the same index at time 0; a sequential queue at
    /// its last index emits `DidFinishPlaying` and stops; every other mode
    /// advances through the regular next resolution.
    pub fn handle_track_finished(&mut self) -> Result<()> {
        if self.queue.current_index().is_none() {
            return Ok(());
        }
        match self.queue.finish_index(self.mode) {
            Some(index) => self.play_track_at_index(index),
            None => {
                if let Some(track) = self.queue.current_track().cloned() {
                    self.subscribers
                        .emit(&PlayerEvent::DidFinishPlaying { track });
                }
                self.stop();
                Ok(())
            }
        }
    }

    /// Periodic progress poll, driven by the platform timer.
    ///
    /// Recomputes time/duration/buffer from the pipeline, emits
    /// `DidChangeProgress`, refreshes the lock screen, and detects a
    /// pipeline-reported natural finish.
    pub fn tick(&mut self) {
        if self.queue.current_track().is_none() {
            return;
        }

        self.session.current_time = self.pipeline.current_time().max(0.0);
        let duration = self.pipeline.duration();
        if duration > 0.0 {
            self.session.total_time = duration;
        }
        self.session.buffered_progress = self.pipeline.buffered_fraction().clamp(0.0, 1.0);
        self.emit_progress();

        if self.session.is_playing && self.pipeline.is_finished() {
            // Failures in the follow-up track are surfaced as events
            let _ = self.handle_track_finished();
        }
    }

    /// Apply the outcome of an asynchronous pipeline load.
    ///
    /// `generation` is the value of [`load_generation`](Self::load_generation)
    /// the platform observed when the load started; completions for a
    /// superseded track carry an older generation and are discarded.
    pub fn complete_load(&mut self, generation: u64, outcome: std::result::Result<f64, String>) {
        if generation != self.load_generation {
            tracing::debug!(
                generation,
                current = self.load_generation,
                "discarding stale load completion"
            );
            return;
        }
        match outcome {
            Ok(duration) => {
                if duration > 0.0 {
                    self.session.total_time = duration;
                }
                self.emit_progress();
            }
            Err(message) => {
                let _ = self.fail_playback(message);
            }
        }
    }

    /// Report a pipeline failure detected outside the load path (stalled
    /// item, media services reset). Emits `PlaybackFailed` and falls back
    /// to the stopped state.
    pub fn handle_load_failure(&mut self, message: impl Into<String>) -> Result<()> {
        self.fail_playback(message.into())
    }

    // ===== Mode =====

    /// Current playback mode
    pub fn mode(&self) -> PlaybackMode {
        self.mode
    }

    /// Change the playback mode; takes effect on the next resolution
    pub fn set_mode(&mut self, mode: PlaybackMode) {
        self.mode = mode;
    }

    // ===== Picture in picture =====

    /// Bring up the PiP surface if the platform supports it
    pub fn enable_pip(&mut self) {
        if let Some(pip) = &mut self.pip {
            if pip.is_supported() {
                pip.start();
                self.session.pip_active = pip.is_active();
            }
        }
    }

    /// Tear down the PiP surface
    pub fn disable_pip(&mut self) {
        if let Some(pip) = &mut self.pip {
            pip.stop();
        }
        self.session.pip_active = false;
    }

    /// Whether the PiP surface is active
    pub fn is_pip_active(&self) -> bool {
        self.session.pip_active
    }

    // ===== State queries =====

    /// Cursor position in the queue
    pub fn current_index(&self) -> Option<usize> {
        self.queue.current_index()
    }

    /// Track under the cursor
    pub fn current_track(&self) -> Option<&Track> {
        self.queue.current_track()
    }

    /// The queued tracks in order
    pub fn queue_tracks(&self) -> &[Track] {
        self.queue.tracks()
    }

    /// Queue length
    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    /// Session snapshot (time, duration, buffer, flags)
    pub fn session(&self) -> &SessionState {
        &self.session
    }

    /// Whether playback is running
    pub fn is_playing(&self) -> bool {
        self.session.is_playing
    }

    /// Monotonic load generation for async pipeline completions
    pub fn load_generation(&self) -> u64 {
        self.load_generation
    }

    /// Interval the platform should drive [`tick`](Self::tick) at
    pub fn tick_interval(&self) -> Duration {
        self.config.tick_interval
    }

    // ===== Internal =====

    /// Surface a load/playback failure: emit `PlaybackFailed`, fall back
    /// to the stopped state, and return the error to the caller.
    fn fail_playback(&mut self, message: String) -> Result<()> {
        tracing::warn!(%message, "playback failed");
        self.subscribers.emit(&PlayerEvent::PlaybackFailed {
            message: message.clone(),
        });
        self.stop();
        Err(PlayerError::MediaLoad(message))
    }

    fn emit_progress(&mut self) {
        self.subscribers.emit(&PlayerEvent::DidChangeProgress {
            current_time: self.session.current_time,
            total_time: self.session.total_time,
            progress: self.session.progress(),
            buffered_progress: self.session.buffered_progress,
        });
        self.push_lock_screen_progress();
    }

    fn push_lock_screen_progress(&mut self) {
        if let Some(now_playing) = &mut self.now_playing {
            now_playing.update_progress(self.session.current_time, self.session.total_time);
        }
    }
}
