//! Unsplash API HTTP client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::{debug, warn};

use super::dto::ErrorResponse;
use crate::domain::entities::AccessKey;
use crate::domain::errors::FeedError;
use crate::domain::ports::PhotoProviderPort;

/// Unsplash REST root.
pub const UNSPLASH_API_BASE: &str = "https://api.unsplash.com";

/// Largest `count` the random endpoint accepts.
pub const MAX_PAGE_SIZE: u32 = 30;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const USER_AGENT: &str = concat!("photofeed/", env!("CARGO_PKG_VERSION"));

/// Unsplash random-photo client.
pub struct UnsplashClient {
    client: Client,
    base_url: String,
    access_key: AccessKey,
}

impl std::fmt::Debug for UnsplashClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UnsplashClient")
            .field("base_url", &self.base_url)
            .field("access_key", &self.access_key)
            .finish_non_exhaustive()
    }
}

impl UnsplashClient {
    /// Creates new client with default base URL and timeout.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn new(access_key: AccessKey) -> Result<Self, FeedError> {
        Self::with_base_url(access_key, UNSPLASH_API_BASE, DEFAULT_TIMEOUT)
    }

    /// Creates client with custom base URL and request timeout.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn with_base_url(
        access_key: AccessKey,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, FeedError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| FeedError::unexpected(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            access_key,
        })
    }

    fn random_photos_url(&self) -> String {
        format!("{}/photos/random", self.base_url)
    }

    async fn handle_error_response(status: StatusCode, response: reqwest::Response) -> FeedError {
        let error_message = match response.json::<ErrorResponse>().await {
            Ok(error) if !error.errors.is_empty() => error.message(),
            _ => format!("HTTP {status}"),
        };

        match status {
            StatusCode::TOO_MANY_REQUESTS => FeedError::RateLimited,
            StatusCode::FORBIDDEN if error_message.contains("Rate Limit") => FeedError::RateLimited,
            StatusCode::SERVICE_UNAVAILABLE | StatusCode::GATEWAY_TIMEOUT => {
                FeedError::network("Unsplash API is temporarily unavailable")
            }
            _ => FeedError::rejected(status.as_u16(), error_message),
        }
    }
}

#[async_trait]
impl PhotoProviderPort for UnsplashClient {
    async fn random_photos(&self, count: u32) -> Result<Vec<Value>, FeedError> {
        let count = count.clamp(1, MAX_PAGE_SIZE);

        debug!(count, "Requesting random photos from Unsplash");

        let response = self
            .client
            .get(self.random_photos_url())
            .header("Accept-Version", "v1")
            .query(&[
                ("client_id", self.access_key.as_str().to_string()),
                ("count", count.to_string()),
            ])
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Failed to reach Unsplash API");
                if e.is_timeout() {
                    FeedError::network("request timed out")
                } else if e.is_connect() {
                    FeedError::network("failed to connect to Unsplash")
                } else {
                    FeedError::network(e.to_string())
                }
            })?;

        let status = response.status();

        if !status.is_success() {
            return Err(Self::handle_error_response(status, response).await);
        }

        let entries: Vec<Value> = response.json().await.map_err(|e| {
            warn!(error = %e, "Failed to parse photo list");
            FeedError::network(format!("failed to parse response: {e}"))
        })?;

        debug!(received = entries.len(), "Unsplash returned photos");

        Ok(entries)
    }
}
