//! Domain entity definitions.

mod access_key;
mod cache_entry;
mod feed_state;
pub(crate) mod image_record;

pub use access_key::AccessKey;
pub use cache_entry::CacheEntry;
pub use feed_state::{FeedState, LikeState};
pub use image_record::{Comment, ImageId, ImageLocation, ImageRecord, ImageUrls, ImageUser};
