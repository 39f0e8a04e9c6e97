//! Photo entity as held in the feed.

use serde::{Deserialize, Serialize};

/// Provider-assigned photo identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageId(String);

impl ImageId {
    /// Creates a new `ImageId` from any string-like input.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the inner string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ImageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ImageId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for ImageId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

/// Rendition URLs offered by the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageUrls {
    /// Small preview used in the grid.
    pub thumb: String,
    /// Original upload.
    pub raw: String,
    /// Full-size JPEG.
    pub full: String,
    /// Display-size JPEG.
    pub regular: String,
}

/// Photographer of an image.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ImageUser {
    /// Provider handle, used to link to the profile view.
    pub username: String,
}

/// Where the photo was taken, when known.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ImageLocation {
    /// Country name, absent for most photos.
    #[serde(default)]
    pub country: Option<String>,
}

/// A comment left on an image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// Commenter handle.
    pub author: String,
    /// Comment body.
    pub text: String,
}

/// A validated photo in the feed.
///
/// Everything except the like counter is fixed once the record has been
/// normalized. The counter is only touched by the like controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageRecord {
    id: ImageId,
    urls: ImageUrls,
    #[serde(default)]
    user: ImageUser,
    #[serde(default)]
    location: ImageLocation,
    #[serde(default)]
    alt_description: String,
    #[serde(default)]
    likes: u32,
    #[serde(default)]
    comments: Vec<Comment>,
}

impl ImageRecord {
    /// Creates a record with an empty comment list.
    #[must_use]
    pub fn new(
        id: impl Into<ImageId>,
        urls: ImageUrls,
        user: ImageUser,
        location: ImageLocation,
        alt_description: impl Into<String>,
        likes: u32,
    ) -> Self {
        Self {
            id: id.into(),
            urls,
            user,
            location,
            alt_description: alt_description.into(),
            likes,
            comments: Vec::new(),
        }
    }

    #[must_use]
    pub const fn id(&self) -> &ImageId {
        &self.id
    }

    #[must_use]
    pub const fn urls(&self) -> &ImageUrls {
        &self.urls
    }

    #[must_use]
    pub const fn user(&self) -> &ImageUser {
        &self.user
    }

    #[must_use]
    pub fn username(&self) -> &str {
        &self.user.username
    }

    #[must_use]
    pub fn country(&self) -> Option<&str> {
        self.location.country.as_deref()
    }

    #[must_use]
    pub fn alt_description(&self) -> &str {
        &self.alt_description
    }

    /// Current like count, including any local like.
    #[must_use]
    pub const fn likes(&self) -> u32 {
        self.likes
    }

    #[must_use]
    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    /// Adds one like. Returns `None`, leaving the count alone, if the
    /// counter is already at its maximum.
    pub(crate) fn increment_likes(&mut self) -> Option<u32> {
        self.likes = self.likes.checked_add(1)?;
        Some(self.likes)
    }

    pub(crate) fn decrement_likes(&mut self) -> u32 {
        self.likes = self.likes.saturating_sub(1);
        self.likes
    }
}
