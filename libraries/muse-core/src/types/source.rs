/// Music source backends
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies which third-party backend a track originated from.
///
/// Two tracks with the same catalog id from different sources are distinct
/// entities; the source tag takes part in track identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MusicSource {
    /// NetEase Cloud Music
    Netease,
    /// QQ Music (Tencent)
    Tencent,
    /// Kuwo Music
    Kuwo,
    /// Any other backend, carried by its raw tag
    Other(String),
}

impl MusicSource {
    /// Raw tag used on the wire and in storage keys
    pub fn as_str(&self) -> &str {
        match self {
            MusicSource::Netease => "netease",
            MusicSource::Tencent => "tencent",
            MusicSource::Kuwo => "kuwo",
            MusicSource::Other(tag) => tag.as_str(),
        }
    }

    /// Parse a source tag; unknown tags are preserved as `Other`
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "netease" => MusicSource::Netease,
            "tencent" => MusicSource::Tencent,
            "kuwo" => MusicSource::Kuwo,
            other => MusicSource::Other(other.to_string()),
        }
    }
}

impl fmt::Display for MusicSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Default for MusicSource {
    fn default() -> Self {
        MusicSource::Netease
    }
}
