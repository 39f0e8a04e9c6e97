//! Photo object as returned by the provider.
//!
//! Every field is optional here; the schema decides what is required.

use serde::Deserialize;

/// Provider photo object. Unknown fields are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawImage {
    /// Photo id.
    #[serde(default)]
    pub id: Option<String>,
    /// Rendition URLs.
    #[serde(default)]
    pub urls: Option<RawUrls>,
    /// Photographer.
    #[serde(default)]
    pub user: Option<RawUser>,
    /// Location, often `null`.
    #[serde(default)]
    pub location: Option<RawLocation>,
    /// Generated caption.
    #[serde(default)]
    pub alt_description: Option<String>,
    /// Provider like count.
    #[serde(default)]
    pub likes: Option<u32>,
}

/// Provider rendition URLs.
#[derive(Debug, Clone, Default, Deserialize)]
#[allow(missing_docs)]
pub struct RawUrls {
    #[serde(default)]
    pub thumb: Option<String>,
    #[serde(default)]
    pub raw: Option<String>,
    #[serde(default)]
    pub full: Option<String>,
    #[serde(default)]
    pub regular: Option<String>,
}

/// Provider user object, trimmed to what the feed shows.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawUser {
    /// Profile handle.
    #[serde(default)]
    pub username: Option<String>,
}

/// Provider location object.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawLocation {
    /// Country name.
    #[serde(default)]
    pub country: Option<String>,
}
