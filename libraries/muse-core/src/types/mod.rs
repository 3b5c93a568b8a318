//! Domain types for Muse Player

mod ids;
mod playlist;
mod source;
mod track;

pub use ids::PlaylistId;
pub use playlist::Playlist;
pub use source::MusicSource;
pub use track::{Track, TrackKey};
