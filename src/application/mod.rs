//! Application layer with feed services, use cases and DTOs.

/// Data transfer objects.
pub mod dto;
/// Feed services.
pub mod services;
/// Use case implementations.
pub mod use_cases;

pub use services::{FeedFetcher, FetchCoordinator, ScrollPosition};
pub use use_cases::{FeedMount, FeedSession, FeedSessionConfig, FeedSnapshot, LoadOutcome};
