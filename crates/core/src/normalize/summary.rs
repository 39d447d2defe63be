//! Bundled presentation view of a record.

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::GameRecord;

use super::{
    content::{content_rating_icon, ContentRatingIcon},
    media::{display_name, display_release, hero_image, release_date},
    platform::{group_platforms, PlatformGroups},
    rating::{metacritic_tier, user_rating_tier, RatingTier},
    tags::visible_tags,
};

/// Presentation-ready view of a [`GameRecord`].
///
/// Holds every derived grouping so the renderer only lays things out.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameSummary {
    /// Catalog identifier.
    pub id: i64,
    /// Name, or the placeholder when blank.
    pub title: String,
    /// Release text, or the placeholder when absent.
    pub release: String,
    /// Parsed release date, when it is a valid `YYYY-MM-DD`.
    pub release_date: Option<NaiveDate>,
    /// Cover image, falling back to the first screenshot.
    pub hero_image: Option<String>,
    /// Genre names in catalog order.
    pub genres: Vec<String>,
    /// User rating on a 0–5 scale.
    pub rating: f64,
    /// Tier of [`Self::rating`].
    pub rating_tier: RatingTier,
    /// Metacritic score on a 0–100 scale.
    pub metacritic: Option<i64>,
    /// `None` when the score is unknown.
    pub metacritic_tier: Option<RatingTier>,
    /// Icon for a recognised ESRB label.
    pub content_rating: Option<ContentRatingIcon>,
    /// Platforms grouped by vendor family.
    pub platforms: PlatformGroups,
    /// Store names in catalog order.
    pub stores: Vec<String>,
    /// Tags left after language filtering and truncation.
    pub tags: Vec<String>,
    /// Screenshot URLs.
    pub screenshots: Vec<String>,
    /// Average playtime in hours.
    pub playtime: Option<u32>,
}

impl GameSummary {
    /// Derive every view of `record`.
    pub fn from_record(record: &GameRecord) -> Self {
        Self {
            id: record.id,
            title: display_name(record).to_string(),
            release: display_release(record).to_string(),
            release_date: release_date(record),
            hero_image: hero_image(record).map(str::to_string),
            genres: record.genres.iter().map(|genre| genre.name.clone()).collect(),
            rating: record.rating,
            rating_tier: user_rating_tier(record.rating),
            metacritic: record.metacritic,
            metacritic_tier: metacritic_tier(record.metacritic),
            content_rating: content_rating_icon(record.content_rating_label()),
            platforms: group_platforms(record.platform_names()),
            stores: record.store_names().into_iter().map(str::to_string).collect(),
            tags: visible_tags(&record.tags)
                .into_iter()
                .map(|tag| tag.name.clone())
                .collect(),
            screenshots: record
                .short_screenshots
                .iter()
                .map(|shot| shot.image.clone())
                .collect(),
            playtime: record.playtime,
        }
    }
}

impl From<&GameRecord> for GameSummary {
    fn from(record: &GameRecord) -> Self {
        Self::from_record(record)
    }
}
