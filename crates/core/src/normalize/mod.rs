//! Pure derivations over a [`crate::models::GameRecord`].

/// ESRB icon lookup.
pub mod content;
/// Display fallbacks for optional fields.
pub mod media;
/// Platform family clustering.
pub mod platform;
/// Score tiers.
pub mod rating;
/// Combined presentation view.
pub mod summary;
/// Tag filtering.
pub mod tags;

pub use content::{content_rating_icon, ContentRatingIcon, NO_CONTENT_RATING};
pub use media::{display_name, display_release, hero_image, release_date};
pub use platform::{family_for, group_platforms, PlatformFamily, PlatformGroups, FAMILY_TABLE};
pub use rating::{metacritic_tier, user_rating_tier, RatingTier};
pub use summary::GameSummary;
pub use tags::{visible_tags, EXCLUDED_TAG_LANGUAGE, MAX_VISIBLE_TAGS};
