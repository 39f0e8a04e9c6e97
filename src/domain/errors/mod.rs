//! Domain error types.

mod feed_error;
mod schema_error;

pub use feed_error::FeedError;
pub use schema_error::SchemaError;
