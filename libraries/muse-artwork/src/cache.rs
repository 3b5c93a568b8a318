use crate::error::{ArtworkError, Result};
use crate::types::{CacheStats, ImageKey, ImageSize};
use async_trait::async_trait;
use muse_core::types::{MusicSource, Track};
use muse_core::MusicApi;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, Mutex};
use tokio::time::Instant;

/// Upstream URL resolution seam, adapted over the backend API client
#[async_trait]
pub trait ImageResolver: Send + Sync {
    /// Resolve a picture id to a concrete image URL for one rendition
    async fn resolve(
        &self,
        pic_id: &str,
        source: &MusicSource,
        size: ImageSize,
    ) -> muse_core::Result<String>;
}

/// [`ImageResolver`] over the backend API client
pub struct ApiResolver {
    api: Arc<dyn MusicApi>,
}

impl ApiResolver {
    pub fn new(api: Arc<dyn MusicApi>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl ImageResolver for ApiResolver {
    async fn resolve(
        &self,
        pic_id: &str,
        source: &MusicSource,
        size: ImageSize,
    ) -> muse_core::Result<String> {
        self.api
            .image_url(pic_id, Some(source.clone()), size.pixels())
            .await
    }
}

/// One resolved-or-resolving slot in the cache map.
///
/// `Pending` holds the broadcast side that fans the single in-flight
/// resolution out to every caller waiting on the same key.
enum Slot {
    Ready {
        url: String,
        expires_at: Instant,
    },
    Pending(broadcast::Sender<std::result::Result<String, String>>),
}

/// Shared slot map plus what the detached resolution task needs
struct CacheInner {
    resolver: Arc<dyn ImageResolver>,
    ttl: Duration,
    slots: Mutex<HashMap<ImageKey, Slot>>,
}

impl CacheInner {
    /// Run the upstream resolve for `key`, settle its slot, and fan the
    /// outcome out to every waiter. Runs as a detached task, so the slot
    /// is cleared even when every interested caller has been cancelled.
    async fn resolve_and_settle(
        self: Arc<Self>,
        key: ImageKey,
        tx: broadcast::Sender<std::result::Result<String, String>>,
    ) {
        let outcome = self
            .resolver
            .resolve(&key.pic_id, &key.source, key.size)
            .await;

        let mut slots = self.slots.lock().await;
        match outcome {
            Ok(url) => {
                slots.insert(
                    key,
                    Slot::Ready {
                        url: url.clone(),
                        expires_at: Instant::now() + self.ttl,
                    },
                );
                // Waiters may all have gone away; that is fine
                let _ = tx.send(Ok(url));
            }
            Err(err) => {
                slots.remove(&key);
                let message = err.to_string();
                tracing::debug!(pic_id = %key.pic_id, size = %key.size, %message, "image resolution failed");
                let _ = tx.send(Err(message));
            }
        }
    }
}

/// Cover URL cache with TTL expiry and request coalescing.
///
/// Concurrent lookups for the same [`ImageKey`] share one upstream call;
/// failures fan out to every waiter and cache nothing, so the next lookup
/// retries.
pub struct ImageCache {
    inner: Arc<CacheInner>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl ImageCache {
    /// Create a cache over an upstream resolver; entries live for `ttl`
    pub fn new(resolver: Arc<dyn ImageResolver>, ttl: Duration) -> Self {
        Self {
            inner: Arc::new(CacheInner {
                resolver,
                ttl,
                slots: Mutex::new(HashMap::new()),
            }),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Look up the URL for `key`, resolving upstream on a miss.
    ///
    /// A non-expired entry is returned immediately. On a miss, the upstream
    /// call runs as a detached task and every caller for the key, the first
    /// one included, awaits its outcome; cancelling a caller never strands
    /// the in-flight slot. Nothing is cached on failure.
    pub async fn image_url(&self, key: &ImageKey) -> Result<String> {
        if key.pic_id.is_empty() {
            return Err(ArtworkError::MissingPicId);
        }

        let mut rx = {
            let mut slots = self.inner.slots.lock().await;
            match slots.get(key) {
                Some(Slot::Ready { url, expires_at }) if *expires_at > Instant::now() => {
                    self.hits.fetch_add(1, Ordering::Relaxed);
                    return Ok(url.clone());
                }
                Some(Slot::Pending(tx)) => {
                    // Join the in-flight resolution
                    self.misses.fetch_add(1, Ordering::Relaxed);
                    tx.subscribe()
                }
                _ => {
                    // Miss or expired entry; start a detached resolution
                    self.misses.fetch_add(1, Ordering::Relaxed);
                    let (tx, rx) = broadcast::channel(1);
                    slots.insert(key.clone(), Slot::Pending(tx.clone()));
                    tokio::spawn(Arc::clone(&self.inner).resolve_and_settle(key.clone(), tx));
                    rx
                }
            }
        };

        match rx.recv().await {
            Ok(Ok(url)) => Ok(url),
            Ok(Err(message)) => Err(ArtworkError::Resolution(message)),
            Err(_) => Err(ArtworkError::Cancelled),
        }
    }

    /// Warm the cache for a batch of tracks in the background.
    ///
    /// Spawned and best-effort: individual failures are logged at debug
    /// and swallowed. Tracks without a picture id are skipped.
    pub fn precache(
        self: &Arc<Self>,
        tracks: Vec<Track>,
        size: ImageSize,
    ) -> tokio::task::JoinHandle<()> {
        let cache = Arc::clone(self);
        tokio::spawn(async move {
            for track in tracks {
                if track.pic_id.is_empty() {
                    continue;
                }
                let key = ImageKey::new(track.pic_id.clone(), track.source.clone(), size);
                if let Err(err) = cache.image_url(&key).await {
                    tracing::debug!(pic_id = %key.pic_id, error = %err, "precache skipped entry");
                }
            }
        })
    }

    /// Drop every expired entry; pending resolutions are left alone
    pub async fn evict_expired(&self) {
        let now = Instant::now();
        let mut slots = self.inner.slots.lock().await;
        slots.retain(|_, slot| match slot {
            Slot::Ready { expires_at, .. } => *expires_at > now,
            Slot::Pending(_) => true,
        });
    }

    /// Drop every cached URL. Counters are kept; pending resolutions
    /// complete but their results are re-cached only by later lookups.
    pub async fn clear(&self) {
        let mut slots = self.inner.slots.lock().await;
        slots.retain(|_, slot| matches!(slot, Slot::Pending(_)));
    }

    /// Counters and live entry count, without side effects on hit/miss
    pub async fn stats(&self) -> CacheStats {
        let now = Instant::now();
        let slots = self.inner.slots.lock().await;
        let entries = slots
            .values()
            .filter(|slot| matches!(slot, Slot::Ready { expires_at, .. } if *expires_at > now))
            .count();
        CacheStats {
            entries,
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}
