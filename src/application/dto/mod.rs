//! Data transfer objects for the application layer.

mod raw_image;

pub use raw_image::{RawImage, RawLocation, RawUrls, RawUser};
