//! Integration tests for the player controller
//!
//! These tests drive full playback scenarios end to end against a mock
//! pipeline that simulates the passage of media time.

use muse_core::types::{MusicSource, Track};
use muse_playback::{
    MediaPipeline, PlaybackMode, PlayerConfig, PlayerController, PlayerError, PlayerEvent,
};
use std::sync::{Arc, Mutex};

// ===== Test Helpers =====

/// Mock pipeline that advances media time on demand
struct MockPipeline {
    duration: f64,
    position: f64,
    playing: bool,
    loaded: Arc<Mutex<Vec<String>>>,
    fail_on: Option<String>,
}

impl MockPipeline {
    fn new(duration: f64) -> Self {
        Self {
            duration,
            position: 0.0,
            playing: false,
            loaded: Arc::new(Mutex::new(Vec::new())),
            fail_on: None,
        }
    }

    fn loaded_log(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.loaded)
    }
}

impl MediaPipeline for MockPipeline {
    fn load(&mut self, track: &Track) -> muse_playback::Result<()> {
        if self.fail_on.as_deref() == Some(track.track_id.as_str()) {
            return Err(PlayerError::MediaLoad(format!(
                "no playable url for {}",
                track.track_id
            )));
        }
        self.loaded.lock().unwrap().push(track.track_id.clone());
        self.position = 0.0;
        Ok(())
    }

    fn play(&mut self) -> muse_playback::Result<()> {
        self.playing = true;
        Ok(())
    }

    fn pause(&mut self) -> muse_playback::Result<()> {
        self.playing = false;
        Ok(())
    }

    fn stop(&mut self) {
        self.playing = false;
        self.position = 0.0;
    }

    fn seek(&mut self, seconds: f64) -> muse_playback::Result<()> {
        self.position = seconds.min(self.duration);
        Ok(())
    }

    fn current_time(&self) -> f64 {
        self.position
    }

    fn duration(&self) -> f64 {
        self.duration
    }

    fn buffered_fraction(&self) -> f32 {
        1.0
    }

    fn is_finished(&self) -> bool {
        self.playing && self.position >= self.duration
    }
}

/// Shared handle that lets a test move media time forward between ticks
#[derive(Clone)]
struct Clock(Arc<Mutex<f64>>);

struct ClockedPipeline {
    inner: MockPipeline,
    clock: Clock,
}

impl MediaPipeline for ClockedPipeline {
    fn load(&mut self, track: &Track) -> muse_playback::Result<()> {
        *self.clock.0.lock().unwrap() = 0.0;
        self.inner.load(track)
    }

    fn play(&mut self) -> muse_playback::Result<()> {
        self.inner.play()
    }

    fn pause(&mut self) -> muse_playback::Result<()> {
        self.inner.pause()
    }

    fn stop(&mut self) {
        self.inner.stop();
    }

    fn seek(&mut self, seconds: f64) -> muse_playback::Result<()> {
        *self.clock.0.lock().unwrap() = seconds;
        self.inner.seek(seconds)
    }

    fn current_time(&self) -> f64 {
        self.clock.0.lock().unwrap().min(self.inner.duration)
    }

    fn duration(&self) -> f64 {
        self.inner.duration
    }

    fn buffered_fraction(&self) -> f32 {
        1.0
    }

    fn is_finished(&self) -> bool {
        self.inner.playing && *self.clock.0.lock().unwrap() >= self.inner.duration
    }
}

fn make_track(id: &str, name: &str) -> Track {
    let mut track = Track::new(id, name, MusicSource::Netease);
    track.artists = vec!["Test Artist".to_string()];
    track
}

fn make_queue(ids: &[&str]) -> Vec<Track> {
    ids.iter()
        .map(|id| make_track(id, &format!("Song {id}")))
        .collect()
}

fn collect_events(player: &mut PlayerController) -> Arc<Mutex<Vec<PlayerEvent>>> {
    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&events);
    player.subscribe(Box::new(move |event| {
        sink.lock().unwrap().push(event.clone());
    }));
    events
}

// ===== Scenarios =====

#[test]
fn full_album_plays_through_and_stops() {
    let pipeline = MockPipeline::new(180.0);
    let loaded = pipeline.loaded_log();
    let mut player = PlayerController::new(Box::new(pipeline), PlayerConfig::default());
    let events = collect_events(&mut player);

    player.play_queue(make_queue(&["a", "b", "c"]), 0).unwrap();
    player.handle_track_finished().unwrap();
    player.handle_track_finished().unwrap();
    player.handle_track_finished().unwrap(); // last track ends

    assert_eq!(*loaded.lock().unwrap(), vec!["a", "b", "c"]);
    assert!(!player.is_playing());
    assert_eq!(player.current_index(), Some(2));

    let recorded = events.lock().unwrap();
    let finished: Vec<_> = recorded
        .iter()
        .filter_map(|event| match event {
            PlayerEvent::DidFinishPlaying { track } => Some(track.track_id.clone()),
            _ => None,
        })
        .collect();
    assert_eq!(finished, vec!["c"]);
    assert!(recorded
        .iter()
        .any(|event| matches!(event, PlayerEvent::DidStop)));
}

#[test]
fn manual_skip_walkthrough_with_did_stop_at_end() {
    let mut player = PlayerController::new(
        Box::new(MockPipeline::new(180.0)),
        PlayerConfig::default(),
    );
    let events = collect_events(&mut player);

    player.play_queue(make_queue(&["a", "b", "c"]), 0).unwrap();
    player.play_next_track().unwrap();
    player.play_next_track().unwrap();
    player.play_next_track().unwrap(); // past the end

    assert_eq!(player.current_index(), Some(2));
    assert!(!player.is_playing());

    let starts = events
        .lock()
        .unwrap()
        .iter()
        .filter(|event| matches!(event, PlayerEvent::DidStartPlaying { .. }))
        .count();
    assert_eq!(starts, 3);
}

#[test]
fn repeat_all_album_never_stops() {
    let mut player = PlayerController::new(
        Box::new(MockPipeline::new(180.0)),
        PlayerConfig::default(),
    );
    player.set_mode(PlaybackMode::RepeatAll);
    player.play_queue(make_queue(&["a", "b"]), 0).unwrap();

    for _ in 0..6 {
        player.handle_track_finished().unwrap();
        assert!(player.is_playing());
    }
    assert_eq!(player.current_index(), Some(0));
}

#[test]
fn repeat_one_loops_a_single_track_forever() {
    let pipeline = MockPipeline::new(180.0);
    let loaded = pipeline.loaded_log();
    let mut player = PlayerController::new(Box::new(pipeline), PlayerConfig::default());
    player.set_mode(PlaybackMode::RepeatOne);
    player.play_queue(make_queue(&["a", "b", "c"]), 1).unwrap();

    for _ in 0..5 {
        player.handle_track_finished().unwrap();
    }

    assert_eq!(player.current_index(), Some(1));
    assert!(loaded.lock().unwrap().iter().all(|id| id == "b"));
    assert_eq!(loaded.lock().unwrap().len(), 6);
}

#[test]
fn shuffle_keeps_playing_and_avoids_immediate_repeat() {
    let mut player = PlayerController::new(
        Box::new(MockPipeline::new(180.0)),
        PlayerConfig::default(),
    );
    player.set_mode(PlaybackMode::Shuffle);
    player
        .play_queue(make_queue(&["a", "b", "c", "d", "e"]), 0)
        .unwrap();

    let mut previous = player.current_index().unwrap();
    for _ in 0..50 {
        player.play_next_track().unwrap();
        let current = player.current_index().unwrap();
        assert_ne!(current, previous, "shuffle repeated the same index");
        assert!(current < 5);
        previous = current;
    }
}

#[test]
fn ticks_carry_playback_to_the_next_track() {
    let clock = Clock(Arc::new(Mutex::new(0.0)));
    let pipeline = ClockedPipeline {
        inner: MockPipeline::new(10.0),
        clock: clock.clone(),
    };
    let mut player = PlayerController::new(Box::new(pipeline), PlayerConfig::default());
    let events = collect_events(&mut player);

    player.play_queue(make_queue(&["a", "b"]), 0).unwrap();

    // Simulate the platform timer firing as media time advances
    for step in 1..=10 {
        *clock.0.lock().unwrap() = f64::from(step);
        player.tick();
    }

    assert_eq!(player.current_index(), Some(1));
    assert!(player.is_playing());
    assert_eq!(player.session().current_time, 0.0);

    let recorded = events.lock().unwrap();
    let progress_count = recorded
        .iter()
        .filter(|event| matches!(event, PlayerEvent::DidChangeProgress { .. }))
        .count();
    assert!(progress_count >= 10);
    assert!(recorded.iter().any(|event| matches!(
        event,
        PlayerEvent::DidStartPlaying { track } if track.track_id == "b"
    )));
}

#[test]
fn progress_fraction_tracks_media_time() {
    let clock = Clock(Arc::new(Mutex::new(0.0)));
    let pipeline = ClockedPipeline {
        inner: MockPipeline::new(200.0),
        clock: clock.clone(),
    };
    let mut player = PlayerController::new(Box::new(pipeline), PlayerConfig::default());
    let events = collect_events(&mut player);

    player.play_queue(make_queue(&["a"]), 0).unwrap();
    *clock.0.lock().unwrap() = 50.0;
    player.tick();

    let recorded = events.lock().unwrap();
    let last = recorded
        .iter()
        .rev()
        .find_map(|event| match event {
            PlayerEvent::DidChangeProgress { progress, .. } => Some(*progress),
            _ => None,
        })
        .unwrap();
    assert!((last - 0.25).abs() < 1e-6);
}

#[test]
fn switching_playlists_resets_the_session() {
    let clock = Clock(Arc::new(Mutex::new(0.0)));
    let pipeline = ClockedPipeline {
        inner: MockPipeline::new(100.0),
        clock: clock.clone(),
    };
    let mut player = PlayerController::new(Box::new(pipeline), PlayerConfig::default());

    player.play_queue(make_queue(&["a", "b"]), 0).unwrap();
    *clock.0.lock().unwrap() = 40.0;
    player.tick();
    assert_eq!(player.session().current_time, 40.0);

    player.play_queue(make_queue(&["x", "y"]), 1).unwrap();
    assert_eq!(player.session().current_time, 0.0);
    assert_eq!(player.current_track().unwrap().track_id, "y");
}

#[test]
fn resuming_the_same_track_does_not_reload() {
    let pipeline = MockPipeline::new(100.0);
    let loaded = pipeline.loaded_log();
    let mut player = PlayerController::new(Box::new(pipeline), PlayerConfig::default());

    let queue = make_queue(&["a", "b"]);
    player.play_queue(queue.clone(), 0).unwrap();
    player.pause().unwrap();
    player.play_queue(queue, 0).unwrap();

    assert_eq!(loaded.lock().unwrap().len(), 1);
    assert!(player.is_playing());
}

#[test]
fn failing_track_surfaces_error_and_event() {
    let mut pipeline = MockPipeline::new(100.0);
    pipeline.fail_on = Some("b".to_string());
    let mut player = PlayerController::new(Box::new(pipeline), PlayerConfig::default());
    let events = collect_events(&mut player);

    player.play_queue(make_queue(&["a", "b"]), 0).unwrap();
    let err = player.play_next_track().unwrap_err();
    assert!(matches!(err, PlayerError::MediaLoad(_)));

    let recorded = events.lock().unwrap();
    assert!(recorded.iter().any(|event| matches!(
        event,
        PlayerEvent::PlaybackFailed { message } if message.contains('b')
    )));
    drop(recorded);
    assert!(!player.is_playing());
}

#[test]
fn empty_queue_navigation_is_harmless() {
    let mut player = PlayerController::new(
        Box::new(MockPipeline::new(100.0)),
        PlayerConfig::default(),
    );

    player.play_next_track().unwrap();
    player.play_previous_track().unwrap();
    player.handle_track_finished().unwrap();
    player.tick();

    assert_eq!(player.current_index(), None);
    assert!(!player.is_playing());
}
