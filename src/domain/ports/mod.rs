mod feed_cache_port;
mod photo_provider_port;

pub use feed_cache_port::{CacheError, CacheResult, FeedCachePort};
pub use photo_provider_port::PhotoProviderPort;
