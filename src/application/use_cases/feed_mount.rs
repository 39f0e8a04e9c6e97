//! Scoped mount of a feed session and its scroll listener.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::{JoinHandle, JoinSet};
use tracing::{debug, trace, warn};

use super::feed_session::{FeedSession, LoadOutcome, MountSource};
use crate::application::services::ScrollPosition;
use crate::domain::errors::FeedError;

/// A mounted feed view.
///
/// Listens for scroll signals and turns them into page requests. Dropping
/// the mount stops the listener, aborts any request it started and tears
/// down the session state.
pub struct FeedMount {
    session: Arc<FeedSession>,
    listener: JoinHandle<()>,
}

impl std::fmt::Debug for FeedMount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeedMount")
            .field("session", &self.session.id())
            .finish_non_exhaustive()
    }
}

impl FeedMount {
    /// Loads the initial feed, then starts the scroll listener.
    ///
    /// Scroll signals sent before the feed is in place wait in the channel.
    /// The mount stays usable when the initial load fails; the error is
    /// returned alongside it so the caller can report it.
    pub async fn mount(
        session: Arc<FeedSession>,
        scroll_rx: mpsc::Receiver<ScrollPosition>,
    ) -> (Self, Result<MountSource, FeedError>) {
        let initial = session.mount().await;
        let listener = tokio::spawn(listen(session.clone(), scroll_rx));
        (Self { session, listener }, initial)
    }

    #[must_use]
    pub const fn session(&self) -> &Arc<FeedSession> {
        &self.session
    }
}

impl Drop for FeedMount {
    fn drop(&mut self) {
        self.listener.abort();
        self.session.unmount();
    }
}

async fn listen(session: Arc<FeedSession>, mut scroll_rx: mpsc::Receiver<ScrollPosition>) {
    let mut loads = JoinSet::new();

    loop {
        tokio::select! {
            position = scroll_rx.recv() => {
                let Some(position) = position else {
                    debug!(session = %session.id(), "Scroll channel closed");
                    break;
                };
                let session = session.clone();
                loads.spawn(async move { session.on_scroll(position).await });
            }
            Some(joined) = loads.join_next() => match joined {
                Ok(Ok(LoadOutcome::Skipped(admission))) => {
                    trace!(?admission, "Scroll signal skipped");
                }
                Ok(Ok(outcome)) => debug!(?outcome, "Scroll-triggered load finished"),
                Ok(Err(e)) => warn!(error = %e, "Scroll-triggered load failed"),
                Err(e) if e.is_cancelled() => {}
                Err(e) => warn!(error = %e, "Load task panicked"),
            },
        }
    }

    while let Some(joined) = loads.join_next().await {
        if let Ok(Err(e)) = joined {
            warn!(error = %e, "Scroll-triggered load failed");
        }
    }
}
