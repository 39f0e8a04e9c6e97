//! Feed loading error types.

use thiserror::Error;

use super::SchemaError;

/// Feed error variants.
///
/// `NetworkFailure`, `Rejected` and `RateLimited` together form the network
/// failure class: transport errors, timeouts, unparsable bodies and non-2xx
/// statuses. `Rejected` and `RateLimited` only split out the status cases
/// callers may want to tell apart. [`FeedError::is_network_error`] matches
/// the whole class.
#[derive(Debug, Clone, Error)]
#[allow(missing_docs)]
pub enum FeedError {
    #[error("network error while fetching photos: {message}")]
    NetworkFailure { message: String },

    #[error("photo provider rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("rate limited by photo provider")]
    RateLimited,

    #[error("invalid photo record: {0}")]
    SchemaInvalid(#[from] SchemaError),

    #[error("unexpected feed error: {message}")]
    Unexpected { message: String },
}

impl FeedError {
    /// Creates network error.
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self::NetworkFailure {
            message: message.into(),
        }
    }

    /// Creates rejected-request error.
    #[must_use]
    pub fn rejected(status: u16, message: impl Into<String>) -> Self {
        Self::Rejected {
            status,
            message: message.into(),
        }
    }

    /// Creates unexpected error.
    #[must_use]
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected {
            message: message.into(),
        }
    }

    /// Returns whether the failure came from the transport or the provider's
    /// response status.
    #[must_use]
    pub const fn is_network_error(&self) -> bool {
        matches!(
            self,
            Self::NetworkFailure { .. } | Self::Rejected { .. } | Self::RateLimited
        )
    }

    /// Returns whether a later load attempt may succeed.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::NetworkFailure { .. } | Self::RateLimited | Self::SchemaInvalid(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        assert!(FeedError::network("timeout").is_network_error());
        assert!(FeedError::rejected(401, "bad key").is_network_error());
        assert!(!FeedError::rejected(401, "bad key").is_recoverable());
        assert!(FeedError::RateLimited.is_recoverable());

        let schema: FeedError = SchemaError::MissingField("id").into();
        assert!(!schema.is_network_error());
    }

    #[test]
    fn test_non_success_statuses_are_network_class() {
        for err in [
            FeedError::rejected(500, "internal"),
            FeedError::rejected(404, "not found"),
            FeedError::RateLimited,
            FeedError::network("request timed out"),
        ] {
            assert!(err.is_network_error(), "{err}");
        }
        assert!(!FeedError::unexpected("client build failed").is_network_error());
    }

    #[test]
    fn test_display_includes_status() {
        let err = FeedError::rejected(503, "maintenance");
        assert_eq!(
            err.to_string(),
            "photo provider rejected the request (503): maintenance"
        );
    }
}
