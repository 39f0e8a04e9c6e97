//! Feed services: schema, fetching, request coordination and likes.

pub mod feed_fetcher;
pub mod fetch_coordinator;
pub mod image_schema;
pub mod like_controller;

pub use feed_fetcher::{FeedFetcher, FetchedPage, MergeReport, RejectedEntry};
pub use fetch_coordinator::{
    Admission, DEFAULT_SCROLL_THRESHOLD, FetchCoordinator, FetchPhase, FetchTicket, ScrollPosition,
};
pub use like_controller::{LikeToggle, toggle_like};
