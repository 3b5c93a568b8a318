/// Track domain type
use crate::types::MusicSource;
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// A streamable track from one of the music source backends.
///
/// Identity is the `(track_id, source)` pair: the same catalog id from two
/// different backends names two different tracks. `PartialEq`/`Hash` follow
/// that identity, not the display metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    /// Catalog identifier, unique within one source
    pub track_id: String,

    /// Display name
    pub name: String,

    /// Artist names, in credited order (may be empty)
    pub artists: Vec<String>,

    /// Album name
    pub album: String,

    /// Picture reference id, resolved to a URL on demand
    pub pic_id: String,

    /// Lyrics reference id
    pub lyric_id: String,

    /// Backend this track originated from
    pub source: MusicSource,
}

/// Explicit identity key for a track: `(track_id, source)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TrackKey {
    /// Catalog identifier
    pub track_id: String,
    /// Originating backend
    pub source: MusicSource,
}

impl Track {
    /// Create a track with minimal metadata
    pub fn new(
        track_id: impl Into<String>,
        name: impl Into<String>,
        source: MusicSource,
    ) -> Self {
        Self {
            track_id: track_id.into(),
            name: name.into(),
            artists: Vec::new(),
            album: String::new(),
            pic_id: String::new(),
            lyric_id: String::new(),
            source,
        }
    }

    /// Identity key of this track
    pub fn key(&self) -> TrackKey {
        TrackKey {
            track_id: self.track_id.clone(),
            source: self.source.clone(),
        }
    }

    /// Artists joined for display ("a / b"), empty string when uncredited
    pub fn artist_line(&self) -> String {
        self.artists.join(" / ")
    }
}

impl PartialEq for Track {
    fn eq(&self, other: &Self) -> bool {
        self.track_id == other.track_id && self.source == other.source
    }
}

impl Eq for Track {}

impl Hash for Track {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.track_id.hash(state);
        self.source.hash(state);
    }
}
