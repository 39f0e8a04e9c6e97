//! Optimistic, local-only like toggling.

use tracing::{debug, warn};

use crate::domain::entities::{FeedState, ImageId};

/// Outcome of a like toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LikeToggle {
    /// Image is now liked; carries the new count.
    Liked { likes: u32 },
    /// Like was withdrawn; carries the restored count.
    Unliked { likes: u32 },
    /// No image with that id is in the feed.
    UnknownImage,
    /// The counter cannot go any higher; nothing changed.
    CounterFull,
}

/// Flips the liked state of `id` and adjusts its counter by exactly one.
///
/// Toggling twice restores the original count.
pub fn toggle_like(state: &mut FeedState, id: &ImageId) -> LikeToggle {
    let (images, liked) = state.parts_mut();

    let Some(image) = images.iter_mut().find(|image| image.id() == id) else {
        debug!(id = %id, "Like toggle for image not in feed");
        return LikeToggle::UnknownImage;
    };

    if liked.remove(id) {
        let likes = image.decrement_likes();
        debug!(id = %id, likes, "Image unliked");
        LikeToggle::Unliked { likes }
    } else {
        let Some(likes) = image.increment_likes() else {
            warn!(id = %id, "Like counter at maximum, toggle refused");
            return LikeToggle::CounterFull;
        };
        liked.insert(id.clone());
        debug!(id = %id, likes, "Image liked");
        LikeToggle::Liked { likes }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::image_record::fixtures::record;

    fn state_with(records: &[(&str, u32)]) -> FeedState {
        let mut state = FeedState::new();
        for (id, likes) in records {
            state.images_mut().push(record(id, *likes));
        }
        state
    }

    #[test]
    fn test_like_then_unlike_restores_count() {
        let mut state = state_with(&[("a", 5)]);
        let id = ImageId::new("a");

        assert_eq!(toggle_like(&mut state, &id), LikeToggle::Liked { likes: 6 });
        assert_eq!(state.get(&id).unwrap().likes(), 6);
        assert!(state.is_liked(&id));
        assert_eq!(state.liked().len(), 1);

        assert_eq!(toggle_like(&mut state, &id), LikeToggle::Unliked { likes: 5 });
        assert_eq!(state.get(&id).unwrap().likes(), 5);
        assert!(state.liked().is_empty());
    }

    #[test]
    fn test_toggle_is_an_involution_for_every_record() {
        let mut state = state_with(&[("a", 0), ("b", 3), ("c", 120)]);
        let before = state.clone();

        for id in ["a", "b", "c"] {
            toggle_like(&mut state, &ImageId::new(id));
            toggle_like(&mut state, &ImageId::new(id));
        }

        assert_eq!(state, before);
    }

    #[test]
    fn test_never_drops_below_baseline() {
        let mut state = state_with(&[("a", 0)]);
        let id = ImageId::new("a");

        for _ in 0..5 {
            toggle_like(&mut state, &id);
            assert!(matches!(state.get(&id).unwrap().likes(), 0 | 1));
        }
        assert_eq!(state.get(&id).unwrap().likes(), 1);
    }

    #[test]
    fn test_only_touches_target_record() {
        let mut state = state_with(&[("a", 5), ("b", 9)]);

        toggle_like(&mut state, &ImageId::new("a"));

        assert_eq!(state.get(&ImageId::new("b")).unwrap().likes(), 9);
        assert!(!state.is_liked(&ImageId::new("b")));
    }

    #[test]
    fn test_full_counter_is_left_untouched() {
        let mut state = state_with(&[("a", u32::MAX)]);
        let id = ImageId::new("a");
        let before = state.clone();

        assert_eq!(toggle_like(&mut state, &id), LikeToggle::CounterFull);
        assert_eq!(state, before);
        assert!(!state.is_liked(&id));

        toggle_like(&mut state, &id);
        assert_eq!(state.get(&id).unwrap().likes(), u32::MAX);
        assert_eq!(state.baseline_images()[0].likes(), u32::MAX);
    }

    #[test]
    fn test_unknown_image_is_noop() {
        let mut state = state_with(&[("a", 5)]);
        let before = state.clone();

        assert_eq!(
            toggle_like(&mut state, &ImageId::new("zzz")),
            LikeToggle::UnknownImage
        );
        assert_eq!(state, before);
    }
}
