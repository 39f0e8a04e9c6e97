//! In-memory feed owned by a mounted view.

use std::collections::HashSet;

use super::{ImageId, ImageRecord};

/// Ids the local user has liked during this session.
///
/// Presence of an id means the matching record's counter sits exactly one
/// above its provider baseline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LikeState {
    ids: HashSet<ImageId>,
}

impl LikeState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn contains(&self, id: &ImageId) -> bool {
        self.ids.contains(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Iterates liked ids in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &ImageId> {
        self.ids.iter()
    }

    pub(crate) fn insert(&mut self, id: ImageId) -> bool {
        self.ids.insert(id)
    }

    pub(crate) fn remove(&mut self, id: &ImageId) -> bool {
        self.ids.remove(id)
    }
}

/// The ordered, deduplicated photo collection plus local like state.
///
/// Images are append-only in arrival order; the only in-place edit is the
/// like counter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedState {
    images: Vec<ImageRecord>,
    liked: LikeState,
}

impl FeedState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn images(&self) -> &[ImageRecord] {
        &self.images
    }

    #[must_use]
    pub const fn liked(&self) -> &LikeState {
        &self.liked
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.images.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: &ImageId) -> Option<&ImageRecord> {
        self.images.iter().find(|image| image.id() == id)
    }

    #[must_use]
    pub fn is_liked(&self, id: &ImageId) -> bool {
        self.liked.contains(id)
    }

    /// Copy of the images with every local like removed from the counters.
    ///
    /// Like state is not persisted, so anything written to the cache must
    /// carry provider baselines only.
    #[must_use]
    pub fn baseline_images(&self) -> Vec<ImageRecord> {
        self.images
            .iter()
            .map(|image| {
                let mut image = image.clone();
                if self.liked.contains(image.id()) {
                    image.decrement_likes();
                }
                image
            })
            .collect()
    }

    pub(crate) fn images_mut(&mut self) -> &mut Vec<ImageRecord> {
        &mut self.images
    }

    pub(crate) fn parts_mut(&mut self) -> (&mut Vec<ImageRecord>, &mut LikeState) {
        (&mut self.images, &mut self.liked)
    }
}
