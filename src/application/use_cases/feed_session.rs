//! Feed session owned by a mounted feed view.

use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::application::services::{
    Admission, DEFAULT_SCROLL_THRESHOLD, FeedFetcher, FetchCoordinator, FetchTicket, LikeToggle,
    MergeReport, ScrollPosition, toggle_like,
};
use crate::domain::entities::{FeedState, ImageId, ImageRecord, LikeState};
use crate::domain::errors::FeedError;
use crate::domain::ports::{FeedCachePort, PhotoProviderPort};

/// Photos requested per page.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Key the feed snapshot is stored under.
pub const DEFAULT_CACHE_KEY: &str = "unsplashImages";

/// Session tuning.
#[derive(Debug, Clone)]
pub struct FeedSessionConfig {
    /// Cache key for the feed snapshot.
    pub cache_key: String,
    /// Photos per page.
    pub page_size: u32,
    /// Quiet period after each request; zero disables it.
    pub cooldown: Duration,
    /// Fraction of the feed height that triggers the next page.
    pub scroll_threshold: f64,
}

impl Default for FeedSessionConfig {
    fn default() -> Self {
        Self {
            cache_key: DEFAULT_CACHE_KEY.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            cooldown: Duration::ZERO,
            scroll_threshold: DEFAULT_SCROLL_THRESHOLD,
        }
    }
}

/// State mutations the session accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedIntent {
    /// Replace the feed with a cached snapshot.
    Hydrate(Vec<ImageRecord>),
    /// Append a validated page.
    AppendPage(Vec<ImageRecord>),
    /// Flip the liked state of one image.
    ToggleLike(ImageId),
}

/// What an intent did to the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedChange {
    /// Feed replaced; number of records kept.
    Hydrated {
        /// Records in the feed after hydration.
        count: usize,
    },
    /// Page appended.
    Appended(MergeReport),
    /// Like toggled.
    Like(LikeToggle),
}

/// Read-only copy of the feed handed to the rendering layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedSnapshot {
    /// Photos in arrival order.
    pub images: Vec<ImageRecord>,
    /// Locally liked ids.
    pub liked: LikeState,
    /// Whether a page request is outstanding.
    pub fetch_in_flight: bool,
    /// Whether scrolling can load further pages.
    pub has_more: bool,
}

/// Result of a load signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// A page was fetched and merged.
    Loaded {
        /// Merge accounting.
        merge: MergeReport,
        /// Entries dropped by the schema.
        rejected: usize,
    },
    /// No request was made.
    Skipped(Admission),
    /// A request completed after the view went away; nothing changed.
    Discarded,
    /// The feed has not been mounted yet.
    NotMounted,
    /// The session has already been torn down.
    Unmounted,
}

/// Where the initial feed came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MountSource {
    /// Fresh cache entry.
    Cache {
        /// Records restored from the cache.
        count: usize,
    },
    /// Cache miss; first page requested.
    Network(LoadOutcome),
    /// An earlier mount already loaded the feed.
    AlreadyMounted,
    /// The session has been torn down and cannot be mounted again.
    Unmounted,
}

struct FeedStore {
    state: FeedState,
    coordinator: FetchCoordinator,
    mounted: bool,
}

fn reduce(state: &mut FeedState, intent: FeedIntent) -> FeedChange {
    match intent {
        FeedIntent::Hydrate(images) => {
            *state = FeedState::new();
            let report = FeedFetcher::merge(state.images_mut(), images);
            if report.skipped > 0 {
                warn!(skipped = report.skipped, "Cached snapshot held duplicate ids");
            }
            FeedChange::Hydrated {
                count: report.appended,
            }
        }
        FeedIntent::AppendPage(records) => {
            FeedChange::Appended(FeedFetcher::merge(state.images_mut(), records))
        }
        FeedIntent::ToggleLike(id) => FeedChange::Like(toggle_like(state, &id)),
    }
}

/// An admitted request. Dropping it hands the ticket back to the
/// coordinator, so a cancelled load cannot leave the feed stuck in
/// `Fetching`.
struct InFlight<'a> {
    session: &'a FeedSession,
    ticket: FetchTicket,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if let Some(store) = self.session.store.lock().as_mut() {
            store.coordinator.finish(self.ticket, Instant::now());
        }
    }
}

/// Owns the feed for as long as the view is mounted.
///
/// State lives behind a short synchronous lock that is never held across an
/// await. Load signals are refused until [`FeedSession::mount`] has run, and
/// after [`FeedSession::unmount`] every late completion is dropped.
pub struct FeedSession {
    id: Uuid,
    store: Mutex<Option<FeedStore>>,
    fetcher: FeedFetcher,
    cache: Arc<dyn FeedCachePort>,
    config: FeedSessionConfig,
}

impl std::fmt::Debug for FeedSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeedSession")
            .field("id", &self.id)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl FeedSession {
    /// Creates a session with an empty, not yet mounted feed.
    #[must_use]
    pub fn new(
        provider: Arc<dyn PhotoProviderPort>,
        cache: Arc<dyn FeedCachePort>,
        config: FeedSessionConfig,
    ) -> Self {
        let store = FeedStore {
            state: FeedState::new(),
            coordinator: FetchCoordinator::new(config.cooldown, config.scroll_threshold),
            mounted: false,
        };

        Self {
            id: Uuid::new_v4(),
            store: Mutex::new(Some(store)),
            fetcher: FeedFetcher::new(provider),
            cache,
            config,
        }
    }

    /// Session identifier used in logs.
    #[must_use]
    pub const fn id(&self) -> Uuid {
        self.id
    }

    #[must_use]
    pub const fn config(&self) -> &FeedSessionConfig {
        &self.config
    }

    /// Loads the initial feed: the cached snapshot if fresh, otherwise the
    /// first page.
    ///
    /// The mount holds the coordinator's ticket from the cache read until the
    /// feed is in place, so load signals arriving meanwhile are `Busy`.
    ///
    /// # Errors
    /// Returns the fetch error if the cache missed and the first page failed.
    pub async fn mount(&self) -> Result<MountSource, FeedError> {
        let admission = {
            let mut guard = self.store.lock();
            let Some(store) = guard.as_mut() else {
                return Ok(MountSource::Unmounted);
            };
            if store.mounted {
                return Ok(MountSource::AlreadyMounted);
            }
            store.mounted = true;
            store.coordinator.try_begin(Instant::now())
        };

        let Admission::Admitted(ticket) = admission else {
            return Ok(MountSource::Network(LoadOutcome::Skipped(admission)));
        };
        let in_flight = InFlight {
            session: self,
            ticket,
        };

        if let Some(entry) = self.cache.read(&self.config.cache_key).await {
            let Some(FeedChange::Hydrated { count }) =
                self.dispatch(FeedIntent::Hydrate(entry.into_images()))
            else {
                return Ok(MountSource::Unmounted);
            };
            info!(session = %self.id, count, "Feed restored from cache");
            return Ok(MountSource::Cache { count });
        }

        debug!(session = %self.id, "Cache miss, requesting first page");
        self.fetch(in_flight).await.map(MountSource::Network)
    }

    /// Requests the next page unless one is already in flight.
    ///
    /// # Errors
    /// Returns the fetch error; the feed is left unchanged and no retry is
    /// scheduled.
    pub async fn load_more(&self) -> Result<LoadOutcome, FeedError> {
        let admission = self.admit(FetchCoordinator::try_begin);
        self.run(admission).await
    }

    /// Requests the next page if `position` is near the end of the feed.
    ///
    /// # Errors
    /// Same as [`FeedSession::load_more`].
    pub async fn on_scroll(&self, position: ScrollPosition) -> Result<LoadOutcome, FeedError> {
        let admission = self.admit(|coordinator, now| coordinator.on_scroll(position, now));
        self.run(admission).await
    }

    fn admit(
        &self,
        decide: impl FnOnce(&mut FetchCoordinator, Instant) -> Admission,
    ) -> Result<Admission, LoadOutcome> {
        let mut guard = self.store.lock();
        match guard.as_mut() {
            None => Err(LoadOutcome::Unmounted),
            Some(store) if !store.mounted => Err(LoadOutcome::NotMounted),
            Some(store) => Ok(decide(&mut store.coordinator, Instant::now())),
        }
    }

    async fn run(&self, admission: Result<Admission, LoadOutcome>) -> Result<LoadOutcome, FeedError> {
        match admission {
            Ok(Admission::Admitted(ticket)) => {
                self.fetch(InFlight {
                    session: self,
                    ticket,
                })
                .await
            }
            Ok(admission) => Ok(LoadOutcome::Skipped(admission)),
            Err(outcome) => Ok(outcome),
        }
    }

    async fn fetch(&self, in_flight: InFlight<'_>) -> Result<LoadOutcome, FeedError> {
        let result = self.fetcher.fetch_page(self.config.page_size).await;

        let merged = {
            let mut guard = self.store.lock();
            let Some(store) = guard.as_mut() else {
                debug!(
                    session = %self.id,
                    ticket = in_flight.ticket.sequence(),
                    "Page arrived after unmount, discarding"
                );
                return Ok(LoadOutcome::Discarded);
            };

            result.map(|page| {
                let rejected = page.rejected.len();
                let merge = FeedFetcher::merge(store.state.images_mut(), page.records);
                info!(
                    session = %self.id,
                    appended = merge.appended,
                    skipped = merge.skipped,
                    rejected,
                    total = store.state.len(),
                    "Page merged into feed"
                );
                (merge, rejected, store.state.baseline_images())
            })
        };

        let (merge, rejected, snapshot) = merged.map_err(|e| {
            warn!(session = %self.id, error = %e, "Page load failed, feed unchanged");
            e
        })?;

        // Persist before releasing the ticket so snapshots are written in order.
        if let Err(e) = self.cache.write(&self.config.cache_key, &snapshot).await {
            warn!(session = %self.id, error = %e, "Failed to persist feed snapshot");
        }
        drop(in_flight);

        Ok(LoadOutcome::Loaded { merge, rejected })
    }

    /// Applies an intent to the live state.
    ///
    /// Returns `None` once the session is unmounted.
    pub fn dispatch(&self, intent: FeedIntent) -> Option<FeedChange> {
        let mut guard = self.store.lock();
        let store = guard.as_mut()?;
        Some(reduce(&mut store.state, intent))
    }

    /// Optimistically flips the liked state of `id`.
    pub fn toggle_like(&self, id: &ImageId) -> Option<LikeToggle> {
        match self.dispatch(FeedIntent::ToggleLike(id.clone()))? {
            FeedChange::Like(toggle) => Some(toggle),
            _ => None,
        }
    }

    /// Copies the current state for rendering.
    #[must_use]
    pub fn snapshot(&self) -> Option<FeedSnapshot> {
        let guard = self.store.lock();
        let store = guard.as_ref()?;
        Some(FeedSnapshot {
            images: store.state.images().to_vec(),
            liked: store.state.liked().clone(),
            fetch_in_flight: store.coordinator.is_fetching(),
            has_more: store.coordinator.has_more(),
        })
    }

    /// Tears down the feed. Returns false if it was already gone.
    pub fn unmount(&self) -> bool {
        let released = self.store.lock().take().is_some();
        if released {
            debug!(session = %self.id, "Feed session unmounted");
        }
        released
    }

    /// Returns true between a successful [`FeedSession::mount`] call and
    /// [`FeedSession::unmount`].
    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.store.lock().as_ref().is_some_and(|store| store.mounted)
    }
}
