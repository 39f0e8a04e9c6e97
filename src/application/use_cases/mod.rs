//! Use case implementations.

mod feed_mount;
mod feed_session;

pub use feed_mount::FeedMount;
pub use feed_session::{
    DEFAULT_CACHE_KEY, DEFAULT_PAGE_SIZE, FeedChange, FeedIntent, FeedSession, FeedSessionConfig,
    FeedSnapshot, LoadOutcome, MountSource,
};
