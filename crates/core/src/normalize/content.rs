//! ESRB content-rating icon lookup.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::Serialize;

/// Text shown when a record has no recognised content rating.
pub const NO_CONTENT_RATING: &str = "No ESRB rating";

/// Icon for one of the fixed ESRB labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ContentRatingIcon {
    /// "Everyone".
    Everyone,
    /// "Everyone 10+".
    EveryoneTenPlus,
    /// "Mature".
    Mature,
    /// "Rating Pending".
    RatingPending,
    /// "Teen".
    Teen,
    /// "Adults Only 18+".
    AdultsOnly,
}

static ICONS_BY_LABEL: Lazy<HashMap<&'static str, ContentRatingIcon>> = Lazy::new(|| {
    HashMap::from([
        ("Everyone", ContentRatingIcon::Everyone),
        ("Everyone 10+", ContentRatingIcon::EveryoneTenPlus),
        ("Mature", ContentRatingIcon::Mature),
        ("Rating Pending", ContentRatingIcon::RatingPending),
        ("Teen", ContentRatingIcon::Teen),
        ("Adults Only 18+", ContentRatingIcon::AdultsOnly),
    ])
});

impl ContentRatingIcon {
    /// Asset path of the icon image.
    pub fn asset(self) -> &'static str {
        match self {
            ContentRatingIcon::Everyone => "esrb/everyone.svg",
            ContentRatingIcon::EveryoneTenPlus => "esrb/everyone-10plus.svg",
            ContentRatingIcon::Mature => "esrb/mature.svg",
            ContentRatingIcon::RatingPending => "esrb/rating-pending.svg",
            ContentRatingIcon::Teen => "esrb/teen.svg",
            ContentRatingIcon::AdultsOnly => "esrb/adults-only.svg",
        }
    }

    /// Short mark printed on the ESRB box art.
    pub fn mark(self) -> &'static str {
        match self {
            ContentRatingIcon::Everyone => "E",
            ContentRatingIcon::EveryoneTenPlus => "E10+",
            ContentRatingIcon::Mature => "M",
            ContentRatingIcon::RatingPending => "RP",
            ContentRatingIcon::Teen => "T",
            ContentRatingIcon::AdultsOnly => "AO",
        }
    }

    /// Catalog label this icon stands for.
    pub fn label(self) -> &'static str {
        match self {
            ContentRatingIcon::Everyone => "Everyone",
            ContentRatingIcon::EveryoneTenPlus => "Everyone 10+",
            ContentRatingIcon::Mature => "Mature",
            ContentRatingIcon::RatingPending => "Rating Pending",
            ContentRatingIcon::Teen => "Teen",
            ContentRatingIcon::AdultsOnly => "Adults Only 18+",
        }
    }
}

/// Exact-match lookup; unknown or absent labels have no icon.
pub fn content_rating_icon(label: Option<&str>) -> Option<ContentRatingIcon> {
    label.and_then(|label| ICONS_BY_LABEL.get(label).copied())
}
