//! Persistent feed cache.

mod file_cache;

pub use file_cache::{DEFAULT_TTL, FileFeedCache};
