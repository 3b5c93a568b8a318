use muse_core::types::MusicSource;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Requested cover rendition. Backends serve fixed square sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageSize {
    /// 300x300, list rows and small widgets
    Small,
    /// 500x500, the now-playing screen and lock screen
    Large,
}

impl ImageSize {
    /// Edge length in pixels for this rendition
    pub fn pixels(self) -> u32 {
        match self {
            Self::Small => 300,
            Self::Large => 500,
        }
    }
}

impl fmt::Display for ImageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.pixels())
    }
}

/// Cache key for a resolved cover URL.
///
/// Different sizes of the same picture are distinct entries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageKey {
    pub pic_id: String,
    pub source: MusicSource,
    pub size: ImageSize,
}

impl ImageKey {
    pub fn new(pic_id: impl Into<String>, source: MusicSource, size: ImageSize) -> Self {
        Self {
            pic_id: pic_id.into(),
            source,
            size,
        }
    }
}

/// Point-in-time cache counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    /// Live (non-expired) cached URLs
    pub entries: usize,
    /// Lookups answered from cache
    pub hits: u64,
    /// Lookups that went upstream or joined an in-flight resolution
    pub misses: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sizes_map_to_backend_pixels() {
        assert_eq!(ImageSize::Small.pixels(), 300);
        assert_eq!(ImageSize::Large.pixels(), 500);
        assert_eq!(ImageSize::Large.to_string(), "500");
    }

    #[test]
    fn keys_distinguish_sizes_of_the_same_picture() {
        let small = ImageKey::new("pic1", MusicSource::Netease, ImageSize::Small);
        let large = ImageKey::new("pic1", MusicSource::Netease, ImageSize::Large);
        assert_ne!(small, large);
        assert_eq!(
            small,
            ImageKey::new("pic1", MusicSource::Netease, ImageSize::Small)
        );
    }
}
