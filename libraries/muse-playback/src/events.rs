//! Playback events and the subscriber registry
//!
//! Every externally observable transition of the engine maps to exactly one
//! event. Delivery is a synchronous fan-out in subscription order, from
//! inside the engine's serialization point, so subscribers see transitions
//! exactly once and in order.

use muse_core::types::Track;
use serde::{Deserialize, Serialize};

/// Events emitted by the playback engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlayerEvent {
    /// A track started playing from time 0 (new selection, navigation,
    /// or a repeat-one replay)
    DidStartPlaying {
        /// The track now playing
        track: Track,
    },

    /// Periodic progress update, also emitted after a seek
    DidChangeProgress {
        /// Playback position in seconds
        current_time: f64,
        /// Total duration in seconds (0 while unknown)
        total_time: f64,
        /// Normalized position, `current_time / total_time` (0 when unknown)
        progress: f32,
        /// Buffered fraction of the media
        buffered_progress: f32,
    },

    /// Playback paused on the current track
    DidPause,

    /// Playback resumed on the current track
    DidResume,

    /// Playback halted (user stop, queue exhausted, or failure recovery)
    DidStop,

    /// The queue played to its natural end
    DidFinishPlaying {
        /// The last track that finished
        track: Track,
    },

    /// A load or playback failure was surfaced to observers
    PlaybackFailed {
        /// Human-readable failure description
        message: String,
    },
}

/// Handle returned by [`SubscriberRegistry::subscribe`]; pass it back to
/// [`SubscriberRegistry::unsubscribe`] to stop receiving events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&PlayerEvent) + Send>;

/// Explicit subscription registry.
///
/// Replaces a weak-delegate observer scheme: subscribers register a
/// callback and hold an id; lifetime is controlled by `unsubscribe`, not
/// by any UI retain discipline.
#[derive(Default)]
pub struct SubscriberRegistry {
    next_id: u64,
    listeners: Vec<(SubscriptionId, Listener)>,
}

impl SubscriberRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener; returns the handle used to unsubscribe
    pub fn subscribe(&mut self, listener: Listener) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, listener));
        id
    }

    /// Remove a listener. Returns false when the id is unknown
    /// (already unsubscribed).
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    /// Fan an event out to every listener in subscription order
    pub fn emit(&mut self, event: &PlayerEvent) {
        for (_, listener) in &mut self.listeners {
            listener(event);
        }
    }

    /// Number of live subscriptions
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    /// Whether the registry has no subscribers
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl std::fmt::Debug for SubscriberRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubscriberRegistry")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn subscribers_receive_in_order() {
        let mut registry = SubscriberRegistry::new();
        let order = Arc::new(std::sync::Mutex::new(Vec::new()));

        let first = Arc::clone(&order);
        registry.subscribe(Box::new(move |_| first.lock().unwrap().push("first")));
        let second = Arc::clone(&order);
        registry.subscribe(Box::new(move |_| second.lock().unwrap().push("second")));

        registry.emit(&PlayerEvent::DidPause);
        assert_eq!(*order.lock().unwrap(), vec!["first", "second"]);
    }

    #[test]
    fn unsubscribe_stops_delivery() {
        let mut registry = SubscriberRegistry::new();
        let count = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&count);
        let id = registry.subscribe(Box::new(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        }));

        registry.emit(&PlayerEvent::DidStop);
        assert!(registry.unsubscribe(id));
        registry.emit(&PlayerEvent::DidStop);

        assert_eq!(count.load(Ordering::SeqCst), 1);
        // Second unsubscribe on the same handle is a no-op
        assert!(!registry.unsubscribe(id));
    }

    #[test]
    fn emit_with_no_subscribers_is_fine() {
        let mut registry = SubscriberRegistry::new();
        assert!(registry.is_empty());
        registry.emit(&PlayerEvent::DidResume);
    }
}
