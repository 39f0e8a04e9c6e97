//! Domain layer with core feed entities and port definitions.

/// Entity definitions.
pub mod entities;
/// Error types.
pub mod errors;
/// Port definitions.
pub mod ports;

pub use entities::{FeedState, ImageId, ImageRecord};
pub use errors::{FeedError, SchemaError};
pub use ports::{FeedCachePort, PhotoProviderPort};
