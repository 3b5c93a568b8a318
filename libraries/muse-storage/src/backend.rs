//! Aggregate storage backends
//!
//! Two implementations of the [`AggregateStore`] seam: an in-memory map
//! for tests and composition, and a directory of JSON files for the
//! device.

use async_trait::async_trait;
use muse_core::{AggregateStore, MuseError, Result};
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

/// Volatile backend; aggregates live in a map
#[derive(Debug, Default)]
pub struct MemoryStore {
    aggregates: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AggregateStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.aggregates.lock().await.get(key).cloned())
    }

    async fn put(&self, key: &str, bytes: Vec<u8>) -> Result<()> {
        self.aggregates.lock().await.insert(key.to_string(), bytes);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.aggregates.lock().await.remove(key);
        Ok(())
    }
}

/// Durable backend; one JSON document per aggregate key under a directory.
///
/// Writes go to a temp file first and are renamed into place, so a crash
/// mid-write leaves the previous document intact.
#[derive(Debug)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Open (creating if needed) the backing directory
    pub async fn open(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        tokio::fs::create_dir_all(&dir).await?;
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        // Keys are fixed identifiers, not user input; reject anything that
        // would escape the directory anyway
        if key.is_empty() || key.contains(['/', '\\', '.']) {
            return Err(MuseError::storage(format!("invalid aggregate key: {key}")));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

#[async_trait]
impl AggregateStore for JsonFileStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let path = self.path_for(key)?;
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    async fn put(&self, key: &str, bytes: Vec<u8>) -> Result<()> {
        let path = self.path_for(key)?;
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, &bytes).await?;
        tokio::fs::rename(&tmp, &path).await?;
        tracing::debug!(key, bytes = bytes.len(), "aggregate written");
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let path = self.path_for(key)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn memory_store_round_trips() {
        let store = MemoryStore::new();
        assert_eq!(store.get("history").await.unwrap(), None);

        store.put("history", b"[1,2,3]".to_vec()).await.unwrap();
        assert_eq!(
            store.get("history").await.unwrap(),
            Some(b"[1,2,3]".to_vec())
        );

        store.remove("history").await.unwrap();
        assert_eq!(store.get("history").await.unwrap(), None);
    }

    #[tokio::test]
    async fn file_store_round_trips_and_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        {
            let store = JsonFileStore::open(dir.path()).await.unwrap();
            store.put("playlists", b"[]".to_vec()).await.unwrap();
        }
        let store = JsonFileStore::open(dir.path()).await.unwrap();
        assert_eq!(store.get("playlists").await.unwrap(), Some(b"[]".to_vec()));
    }

    #[tokio::test]
    async fn file_store_missing_key_is_none_and_remove_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path()).await.unwrap();

        assert_eq!(store.get("history").await.unwrap(), None);
        store.remove("history").await.unwrap();
    }

    #[tokio::test]
    async fn file_store_rejects_escaping_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path()).await.unwrap();
        assert!(store.get("../outside").await.is_err());
        assert!(store.put("a/b", Vec::new()).await.is_err());
    }
}
