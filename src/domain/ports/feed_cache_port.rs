//! Port definition for the persisted feed snapshot.

use async_trait::async_trait;

use crate::domain::entities::{CacheEntry, ImageRecord};

/// Result type for cache operations.
pub type CacheResult<T> = std::result::Result<T, CacheError>;

/// Errors that can occur during cache operations.
#[derive(Debug, Clone, thiserror::Error)]
pub enum CacheError {
    /// Stored entry could not be parsed or breaks an entry invariant.
    #[error("Corrupt cache entry: {0}")]
    Corrupt(String),
    /// Entry could not be serialized.
    #[error("Serialize error: {0}")]
    SerializeError(String),
    /// I/O error during cache operation.
    #[error("IO error: {0}")]
    IoError(String),
}

/// Port for the time-bound feed cache.
///
/// Reads never fail: absent, stale and corrupt entries all read as `None`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FeedCachePort: Send + Sync {
    /// Returns the entry stored under `key` if it is still fresh.
    async fn read(&self, key: &str) -> Option<CacheEntry>;

    /// Replaces the entry under `key` with `images` stamped now.
    async fn write(&self, key: &str, images: &[ImageRecord]) -> CacheResult<()>;
}
