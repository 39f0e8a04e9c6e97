//! Persisted feed snapshot.

use std::collections::HashSet;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ImageRecord;

/// Snapshot of the merged feed stamped with its write time.
///
/// Stored as `{"timestamp": <epoch ms>, "images": [...]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
    timestamp: i64,
    images: Vec<ImageRecord>,
}

impl CacheEntry {
    /// Creates an entry written at `written_at`.
    #[must_use]
    pub fn new(images: Vec<ImageRecord>, written_at: DateTime<Utc>) -> Self {
        Self {
            timestamp: written_at.timestamp_millis(),
            images,
        }
    }

    /// Epoch milliseconds of the write.
    #[must_use]
    pub const fn timestamp_millis(&self) -> i64 {
        self.timestamp
    }

    #[must_use]
    pub fn written_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.timestamp)
    }

    #[must_use]
    pub fn images(&self) -> &[ImageRecord] {
        &self.images
    }

    #[must_use]
    pub fn into_images(self) -> Vec<ImageRecord> {
        self.images
    }

    /// Returns true while `now - timestamp < ttl`.
    ///
    /// At exactly `timestamp + ttl` the entry is already stale.
    #[must_use]
    pub fn is_fresh_at(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        let ttl_ms = i64::try_from(ttl.as_millis()).unwrap_or(i64::MAX);
        let age_ms = now.timestamp_millis().saturating_sub(self.timestamp);
        age_ms < ttl_ms
    }

    /// Returns the first id that appears more than once, if any.
    #[must_use]
    pub fn duplicate_id(&self) -> Option<&str> {
        let mut seen = HashSet::with_capacity(self.images.len());
        self.images
            .iter()
            .map(|image| image.id().as_str())
            .find(|id| !seen.insert(*id))
    }
}
