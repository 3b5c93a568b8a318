use crate::history::HistoryLog;
use muse_core::{
    types::{Playlist, PlaylistId, Track},
    AggregateStore, MuseError, Result,
};
use std::sync::Arc;

const HISTORY_KEY: &str = "history";
const PLAYLISTS_KEY: &str = "playlists";

/// Library state: playback history plus user playlists, persisted as whole
/// JSON aggregates through an [`AggregateStore`].
///
/// Aggregates are loaded once at open and written through after every
/// mutation. The store is the sole authority for playlist ids and keeps
/// each playlist's `total_count` derived from its track list.
pub struct MusicStore {
    backend: Arc<dyn AggregateStore>,
    history: HistoryLog,
    playlists: Vec<Playlist>,
}

impl std::fmt::Debug for MusicStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MusicStore")
            .field("history", &self.history)
            .field("playlists", &self.playlists)
            .finish_non_exhaustive()
    }
}

impl MusicStore {
    /// Load both aggregates and build the store. Absent aggregates start
    /// empty; corrupt ones are an error rather than silent data loss.
    pub async fn open(backend: Arc<dyn AggregateStore>) -> Result<Self> {
        let history = match backend.get(HISTORY_KEY).await? {
            Some(bytes) => serde_json::from_slice(&bytes)?,
            None => HistoryLog::new(),
        };
        let playlists: Vec<Playlist> = match backend.get(PLAYLISTS_KEY).await? {
            Some(bytes) => serde_json::from_slice(&bytes)?,
            None => Vec::new(),
        };
        tracing::debug!(
            history = history.len(),
            playlists = playlists.len(),
            "music store loaded"
        );
        Ok(Self {
            backend,
            history,
            playlists,
        })
    }

    // ===== History =====

    /// Record a play in the history log and persist it
    pub async fn record_history(&mut self, track: Track) -> Result<()> {
        self.history.record(track);
        self.persist_history().await
    }

    /// The history log, most recent first
    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    pub async fn clear_history(&mut self) -> Result<()> {
        self.history.clear();
        self.persist_history().await
    }

    // ===== Playlists =====

    /// All playlists in creation order
    pub fn playlists(&self) -> &[Playlist] {
        &self.playlists
    }

    pub fn playlist(&self, id: &PlaylistId) -> Option<&Playlist> {
        self.playlists.iter().find(|playlist| playlist.id == *id)
    }

    /// Create an empty playlist; the store assigns the id and timestamp
    pub async fn create_playlist(&mut self, name: impl Into<String>) -> Result<Playlist> {
        let playlist = Playlist::new(name);
        tracing::info!(id = %playlist.id, name = %playlist.name, "playlist created");
        self.playlists.push(playlist.clone());
        self.persist_playlists().await?;
        Ok(playlist)
    }

    pub async fn delete_playlist(&mut self, id: &PlaylistId) -> Result<()> {
        let index = self.position_of(id)?;
        let removed = self.playlists.remove(index);
        tracing::info!(id = %removed.id, name = %removed.name, "playlist deleted");
        self.persist_playlists().await
    }

    pub async fn rename_playlist(&mut self, id: &PlaylistId, name: impl Into<String>) -> Result<()> {
        let index = self.position_of(id)?;
        self.playlists[index].name = name.into();
        self.persist_playlists().await
    }

    /// Append a track to a playlist (duplicates allowed)
    pub async fn add_track(&mut self, id: &PlaylistId, track: Track) -> Result<()> {
        let index = self.position_of(id)?;
        self.playlists[index].push_track(track);
        self.persist_playlists().await
    }

    /// Remove every occurrence of `track` from a playlist; returns how
    /// many were removed
    pub async fn remove_track(&mut self, id: &PlaylistId, track: &Track) -> Result<usize> {
        let index = self.position_of(id)?;
        let removed = self.playlists[index].remove_track(track);
        self.persist_playlists().await?;
        Ok(removed)
    }

    /// Remove the track at `index` from a playlist
    pub async fn remove_track_at(&mut self, id: &PlaylistId, index: usize) -> Result<Track> {
        let position = self.position_of(id)?;
        let removed = self.playlists[position].remove_track_at(index)?;
        self.persist_playlists().await?;
        Ok(removed)
    }

    // ===== Internal =====

    fn position_of(&self, id: &PlaylistId) -> Result<usize> {
        self.playlists
            .iter()
            .position(|playlist| playlist.id == *id)
            .ok_or_else(|| MuseError::not_found("playlist", id.as_str()))
    }

    async fn persist_history(&self) -> Result<()> {
        let bytes = serde_json::to_vec(&self.history)?;
        self.backend.put(HISTORY_KEY, bytes).await
    }

    async fn persist_playlists(&self) -> Result<()> {
        let bytes = serde_json::to_vec(&self.playlists)?;
        self.backend.put(PLAYLISTS_KEY, bytes).await
    }
}
