//! Score tiers used to pick a badge severity.

use serde::{Deserialize, Serialize};

/// Coarse three-level classification of a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RatingTier {
    /// Poor score.
    Low,
    /// Average score.
    Medium,
    /// Strong score.
    High,
}

/// Upper bounds (inclusive) of the low and medium tiers on the 0–5 scale.
const USER_RATING_BOUNDS: (f64, f64) = (2.0, 4.0);
/// Upper bounds (inclusive) of the low and medium tiers on the 0–100 scale.
const METACRITIC_BOUNDS: (i64, i64) = (33, 66);

/// Tier for the 0–5 user rating.
pub fn user_rating_tier(rating: f64) -> RatingTier {
    let (low, medium) = USER_RATING_BOUNDS;
    if rating <= low {
        RatingTier::Low
    } else if rating <= medium {
        RatingTier::Medium
    } else {
        RatingTier::High
    }
}

/// Tier for the 0–100 metacritic score. An absent score has no tier.
pub fn metacritic_tier(score: Option<i64>) -> Option<RatingTier> {
    let (low, medium) = METACRITIC_BOUNDS;
    score.map(|score| {
        if score <= low {
            RatingTier::Low
        } else if score <= medium {
            RatingTier::Medium
        } else {
            RatingTier::High
        }
    })
}
