//! Photo provider port definition.

use async_trait::async_trait;

use crate::domain::errors::FeedError;

/// Port for the external photo API.
///
/// Entries come back as raw JSON so the schema can account for each one
/// individually instead of failing the whole page on a single bad entry.
#[async_trait]
pub trait PhotoProviderPort: Send + Sync {
    /// Requests `count` random photos.
    async fn random_photos(&self, count: u32) -> Result<Vec<serde_json::Value>, FeedError>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use parking_lot::Mutex;
    use serde_json::{Value, json};
    use tokio::sync::Semaphore;

    /// Builds a provider-shaped photo object.
    pub fn raw_photo(id: &str, likes: u32) -> Value {
        json!({
            "id": id,
            "alt_description": format!("photo {id}"),
            "likes": likes,
            "urls": {
                "raw": format!("https://images.example/{id}"),
                "full": format!("https://images.example/{id}?q=85"),
                "regular": format!("https://images.example/{id}?w=1080"),
                "small": format!("https://images.example/{id}?w=400"),
                "thumb": format!("https://images.example/{id}?w=200"),
            },
            "user": {"username": format!("user_{id}"), "name": "Someone"},
            "location": {"country": null, "city": null},
        })
    }

    /// Builds a page of photos with ids `{prefix}{n}`.
    pub fn raw_page(prefix: &str, range: std::ops::Range<u32>) -> Vec<Value> {
        range.map(|n| raw_photo(&format!("{prefix}{n}"), n)).collect()
    }

    /// Scripted provider for testing.
    ///
    /// Replies are served in order; once the script runs out every call
    /// fails. When gated, each call waits for a permit from [`Self::release`].
    pub struct MockPhotoProvider {
        replies: Mutex<VecDeque<Result<Vec<Value>, FeedError>>>,
        calls: AtomicUsize,
        gate: Option<Arc<Semaphore>>,
    }

    impl MockPhotoProvider {
        /// Creates a provider that answers immediately.
        pub fn new(replies: Vec<Result<Vec<Value>, FeedError>>) -> Self {
            Self {
                replies: Mutex::new(replies.into()),
                calls: AtomicUsize::new(0),
                gate: None,
            }
        }

        /// Creates a provider whose calls stay in flight until released.
        pub fn gated(replies: Vec<Result<Vec<Value>, FeedError>>) -> Self {
            Self {
                gate: Some(Arc::new(Semaphore::new(0))),
                ..Self::new(replies)
            }
        }

        /// Lets one pending call complete.
        pub fn release(&self) {
            if let Some(gate) = &self.gate {
                gate.add_permits(1);
            }
        }

        /// Number of requests issued so far.
        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl PhotoProviderPort for MockPhotoProvider {
        async fn random_photos(&self, _count: u32) -> Result<Vec<Value>, FeedError> {
            self.calls.fetch_add(1, Ordering::SeqCst);

            if let Some(gate) = &self.gate {
                let permit = gate
                    .acquire()
                    .await
                    .map_err(|_| FeedError::network("gate closed"))?;
                permit.forget();
            }

            self.replies
                .lock()
                .pop_front()
                .unwrap_or_else(|| Err(FeedError::network("mock script exhausted")))
        }
    }
}
