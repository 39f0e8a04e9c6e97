//! Page retrieval and merge into the feed.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, warn};

use super::image_schema;
use crate::domain::entities::{ImageId, ImageRecord};
use crate::domain::errors::{FeedError, SchemaError};
use crate::domain::ports::PhotoProviderPort;

/// A provider entry the schema refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedEntry {
    /// Position of the entry in the provider response.
    pub index: usize,
    /// Why it was refused.
    pub reason: SchemaError,
}

/// Outcome of one page request.
///
/// Invalid entries do not fail the page: the valid subset is kept and every
/// refused entry is listed in `rejected`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchedPage {
    /// Valid records in provider order.
    pub records: Vec<ImageRecord>,
    /// Entries dropped by the schema.
    pub rejected: Vec<RejectedEntry>,
}

impl FetchedPage {
    /// Total number of entries the provider returned.
    #[must_use]
    pub fn received(&self) -> usize {
        self.records.len() + self.rejected.len()
    }

    /// Returns true if some but not all entries were refused.
    #[must_use]
    pub fn is_partial(&self) -> bool {
        !self.rejected.is_empty() && !self.records.is_empty()
    }
}

/// Result of appending a page to the feed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeReport {
    /// Records added to the end of the feed.
    pub appended: usize,
    /// Records dropped because their id was already present.
    pub skipped: usize,
}

/// Requests pages from the provider and folds them into the feed.
#[derive(Clone)]
pub struct FeedFetcher {
    provider: Arc<dyn PhotoProviderPort>,
}

impl FeedFetcher {
    /// Creates new fetcher.
    #[must_use]
    pub fn new(provider: Arc<dyn PhotoProviderPort>) -> Self {
        Self { provider }
    }

    /// Requests `page_size` photos and validates each one.
    ///
    /// # Errors
    /// Returns the provider's error if the request itself fails.
    pub async fn fetch_page(&self, page_size: u32) -> Result<FetchedPage, FeedError> {
        debug!(page_size, "Requesting photo page");

        let entries = self.provider.random_photos(page_size).await.map_err(|e| {
            warn!(error = %e, "Photo page request failed");
            e
        })?;

        let mut page = FetchedPage::default();
        for (index, entry) in entries.into_iter().enumerate() {
            match image_schema::normalize(entry) {
                Ok(record) => page.records.push(record),
                Err(reason) => {
                    warn!(index, reason = %reason, "Dropping invalid photo entry");
                    page.rejected.push(RejectedEntry { index, reason });
                }
            }
        }

        debug!(
            valid = page.records.len(),
            rejected = page.rejected.len(),
            "Photo page validated"
        );

        Ok(page)
    }

    /// Appends `incoming` to `existing`, skipping ids already present.
    ///
    /// The first record seen for an id wins, including repeats inside
    /// `incoming` itself. Order of both sequences is preserved.
    pub fn merge(existing: &mut Vec<ImageRecord>, incoming: Vec<ImageRecord>) -> MergeReport {
        let mut seen: HashSet<ImageId> = existing.iter().map(|i| i.id().clone()).collect();
        let mut report = MergeReport::default();

        existing.reserve(incoming.len());
        for record in incoming {
            if seen.insert(record.id().clone()) {
                existing.push(record);
                report.appended += 1;
            } else {
                report.skipped += 1;
            }
        }

        report
    }
}
