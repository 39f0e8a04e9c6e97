//! Disk-backed feed snapshot cache.
//!
//! Each key maps to one JSON file holding a [`CacheEntry`]. Writes replace
//! the file atomically; reads treat anything unreadable as a miss.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};
use tokio::fs;
use tracing::{debug, trace, warn};

use crate::domain::entities::{CacheEntry, ImageRecord};
use crate::domain::ports::{CacheError, CacheResult, FeedCachePort};

/// Snapshot lifetime: 40 minutes.
pub const DEFAULT_TTL: Duration = Duration::from_secs(2400);

/// Feed cache storing one JSON file per key.
#[derive(Debug, Clone)]
pub struct FileFeedCache {
    cache_dir: PathBuf,
    ttl: Duration,
}

impl FileFeedCache {
    /// Creates a cache rooted at `cache_dir`. The directory is created on
    /// first write.
    #[must_use]
    pub const fn new(cache_dir: PathBuf, ttl: Duration) -> Self {
        Self { cache_dir, ttl }
    }

    /// Creates a cache in the default location (~/.cache/photofeed/feed/).
    #[must_use]
    pub fn default_location(ttl: Duration) -> Self {
        Self::new(dirs_cache_path(), ttl)
    }

    #[must_use]
    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    #[must_use]
    pub const fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns the file backing `key`.
    fn entry_path(&self, key: &str) -> PathBuf {
        let mut hasher = Sha256::new();
        hasher.update(key.as_bytes());
        let digest = hasher.finalize();
        self.cache_dir
            .join(format!("feed-{}.json", hex::encode(&digest[..16])))
    }

    /// Loads the stored entry regardless of age.
    ///
    /// # Errors
    /// Returns `CacheError::Corrupt` if the file cannot be parsed or holds
    /// duplicate ids, and `CacheError::IoError` if it cannot be read.
    pub async fn load(&self, key: &str) -> CacheResult<Option<CacheEntry>> {
        let path = self.entry_path(key);
        let content = match fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(CacheError::IoError(format!("Failed to read cache file: {e}"))),
        };

        let entry: CacheEntry = serde_json::from_str(&content)
            .map_err(|e| CacheError::Corrupt(format!("{}: {e}", path.display())))?;

        if let Some(id) = entry.duplicate_id() {
            return Err(CacheError::Corrupt(format!("duplicate image id {id}")));
        }

        Ok(Some(entry))
    }

    /// Returns the entry under `key` if it is fresh at `now`.
    pub async fn read_at(&self, key: &str, now: DateTime<Utc>) -> Option<CacheEntry> {
        match self.load(key).await {
            Ok(Some(entry)) if entry.is_fresh_at(now, self.ttl) => {
                trace!(key, images = entry.images().len(), "Feed cache hit");
                Some(entry)
            }
            Ok(Some(entry)) => {
                debug!(key, written_at = ?entry.written_at(), "Feed cache entry expired");
                None
            }
            Ok(None) => {
                trace!(key, "Feed cache miss");
                None
            }
            Err(e) => {
                warn!(key, error = %e, "Ignoring unreadable feed cache entry");
                None
            }
        }
    }

    /// Replaces the entry under `key` with `images` stamped `now`.
    ///
    /// # Errors
    /// Returns `CacheError::Corrupt` if `images` repeats an id, and an I/O or
    /// serialization error if the entry cannot be written.
    pub async fn write_at(
        &self,
        key: &str,
        images: &[ImageRecord],
        now: DateTime<Utc>,
    ) -> CacheResult<()> {
        let entry = CacheEntry::new(images.to_vec(), now);
        if let Some(id) = entry.duplicate_id() {
            return Err(CacheError::Corrupt(format!(
                "refusing snapshot with duplicate image id {id}"
            )));
        }

        let content = serde_json::to_vec(&entry)
            .map_err(|e| CacheError::SerializeError(e.to_string()))?;

        fs::create_dir_all(&self.cache_dir)
            .await
            .map_err(|e| CacheError::IoError(format!("Failed to create cache dir: {e}")))?;

        let dir = self.cache_dir.clone();
        let path = self.entry_path(key);
        tokio::task::spawn_blocking(move || persist_atomically(&dir, &path, &content))
            .await
            .map_err(|e| CacheError::IoError(format!("Cache write task failed: {e}")))??;

        debug!(key, images = images.len(), "Stored feed snapshot");
        Ok(())
    }

    /// Removes the entry under `key`, if any.
    pub async fn evict(&self, key: &str) {
        let path = self.entry_path(key);
        if let Err(e) = fs::remove_file(&path).await {
            if e.kind() != std::io::ErrorKind::NotFound {
                warn!(key, error = %e, "Failed to evict feed cache entry");
            }
        } else {
            debug!(key, "Evicted feed cache entry");
        }
    }
}

#[async_trait]
impl FeedCachePort for FileFeedCache {
    async fn read(&self, key: &str) -> Option<CacheEntry> {
        self.read_at(key, Utc::now()).await
    }

    async fn write(&self, key: &str, images: &[ImageRecord]) -> CacheResult<()> {
        self.write_at(key, images, Utc::now()).await
    }
}

fn persist_atomically(dir: &Path, path: &Path, content: &[u8]) -> CacheResult<()> {
    let mut temp_file = tempfile::NamedTempFile::new_in(dir)
        .map_err(|e| CacheError::IoError(format!("Failed to create temp file: {e}")))?;
    temp_file
        .write_all(content)
        .map_err(|e| CacheError::IoError(format!("Failed to write cache file: {e}")))?;
    temp_file
        .persist(path)
        .map_err(|e| CacheError::IoError(format!("Failed to replace cache file: {}", e.error)))?;
    Ok(())
}

/// Returns the default cache directory path.
fn dirs_cache_path() -> PathBuf {
    directories::ProjectDirs::from("com", "linuxmobile", "photofeed").map_or_else(
        || std::env::temp_dir().join("photofeed").join("cache").join("feed"),
        |dirs| dirs.cache_dir().join("feed"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::image_record::fixtures::record;
    use chrono::TimeDelta;
    use tempfile::TempDir;

    const KEY: &str = "unsplashImages";

    fn create_test_cache() -> (FileFeedCache, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let cache = FileFeedCache::new(temp_dir.path().join("feed"), DEFAULT_TTL);
        (cache, temp_dir)
    }

    fn t0() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    fn images() -> Vec<ImageRecord> {
        vec![record("a", 5), record("b", 0), record("c", 12)]
    }

    #[tokio::test]
    async fn test_write_then_read_returns_same_images() {
        let (cache, _temp) = create_test_cache();

        cache.write(KEY, &images()).await.unwrap();
        let entry = cache.read(KEY).await.unwrap();

        assert_eq!(entry.images(), images().as_slice());
    }

    #[tokio::test]
    async fn test_cache_miss_when_absent() {
        let (cache, _temp) = create_test_cache();
        assert!(cache.read(KEY).await.is_none());
    }

    #[tokio::test]
    async fn test_ttl_boundary() {
        let (cache, _temp) = create_test_cache();
        cache.write_at(KEY, &images(), t0()).await.unwrap();

        assert!(cache.read_at(KEY, t0() + TimeDelta::seconds(2399)).await.is_some());
        assert!(cache.read_at(KEY, t0() + TimeDelta::seconds(2400)).await.is_none());
        assert!(cache.read_at(KEY, t0() + TimeDelta::seconds(2401)).await.is_none());
    }

    #[tokio::test]
    async fn test_write_overwrites_previous_entry() {
        let (cache, _temp) = create_test_cache();

        cache.write_at(KEY, &images(), t0()).await.unwrap();
        let later = t0() + TimeDelta::seconds(3000);
        cache.write_at(KEY, &[record("z", 1)], later).await.unwrap();

        let entry = cache.read_at(KEY, later).await.unwrap();
        assert_eq!(entry.images().len(), 1);
        assert_eq!(entry.written_at(), Some(later));
    }

    #[tokio::test]
    async fn test_keys_are_isolated() {
        let (cache, _temp) = create_test_cache();

        cache.write(KEY, &images()).await.unwrap();

        assert!(cache.read("otherFeed").await.is_none());
    }

    #[tokio::test]
    async fn test_corrupt_file_reads_as_miss() {
        let (cache, _temp) = create_test_cache();
        cache.write(KEY, &images()).await.unwrap();
        std::fs::write(cache.entry_path(KEY), "{\"timestamp\": \"soon\"").unwrap();

        assert!(cache.read(KEY).await.is_none());
        assert!(matches!(cache.load(KEY).await, Err(CacheError::Corrupt(_))));
    }

    #[tokio::test]
    async fn test_write_refuses_duplicate_ids() {
        let (cache, _temp) = create_test_cache();
        cache.write(KEY, &images()).await.unwrap();

        let result = cache.write(KEY, &[record("a", 1), record("a", 2)]).await;

        assert!(matches!(result, Err(CacheError::Corrupt(_))));
        assert_eq!(cache.read(KEY).await.unwrap().images(), images().as_slice());
    }

    #[tokio::test]
    async fn test_stored_duplicate_ids_read_as_miss() {
        let (cache, _temp) = create_test_cache();
        let entry = CacheEntry::new(vec![record("a", 1), record("a", 2)], Utc::now());
        std::fs::create_dir_all(cache.cache_dir()).unwrap();
        std::fs::write(cache.entry_path(KEY), serde_json::to_vec(&entry).unwrap()).unwrap();

        assert!(cache.read(KEY).await.is_none());
        assert!(matches!(cache.load(KEY).await, Err(CacheError::Corrupt(_))));
    }

    #[tokio::test]
    async fn test_stored_format_uses_epoch_millis() {
        let (cache, _temp) = create_test_cache();
        cache.write_at(KEY, &images(), t0()).await.unwrap();

        let raw = std::fs::read_to_string(cache.entry_path(KEY)).unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();

        assert_eq!(json["timestamp"], 1_700_000_000_000_i64);
        assert_eq!(json["images"][0]["id"], "a");
        assert_eq!(json["images"][0]["altDescription"], "photo a");
    }

    #[tokio::test]
    async fn test_evict_removes_entry() {
        let (cache, _temp) = create_test_cache();
        cache.write(KEY, &images()).await.unwrap();

        cache.evict(KEY).await;
        cache.evict(KEY).await;

        assert!(cache.read(KEY).await.is_none());
    }
}
