//! Fallback resolution for optional display fields.
//!
//! Each function documents its fallback order so the view never chains
//! optionals itself. Blank strings count as absent.

use chrono::NaiveDate;

use crate::models::GameRecord;

/// Shown when the catalog returns an empty title.
pub const NAME_UNAVAILABLE: &str = "Name unavailable";
/// Shown when the catalog has no release date.
pub const RELEASE_UNAVAILABLE: &str = "Release date unavailable";

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.trim().is_empty())
}

/// Background image, then the first screenshot, then nothing.
pub fn hero_image(record: &GameRecord) -> Option<&str> {
    non_blank(record.background_image.as_deref()).or_else(|| {
        non_blank(
            record
                .short_screenshots
                .first()
                .map(|shot| shot.image.as_str()),
        )
    })
}

/// Title, or [`NAME_UNAVAILABLE`].
pub fn display_name(record: &GameRecord) -> &str {
    non_blank(Some(record.name.as_str())).unwrap_or(NAME_UNAVAILABLE)
}

/// Release date text, or [`RELEASE_UNAVAILABLE`].
pub fn display_release(record: &GameRecord) -> &str {
    non_blank(record.released.as_deref()).unwrap_or(RELEASE_UNAVAILABLE)
}

/// Release date parsed from `YYYY-MM-DD`; `None` when absent or malformed.
pub fn release_date(record: &GameRecord) -> Option<NaiveDate> {
    non_blank(record.released.as_deref())
        .and_then(|raw| NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Screenshot;

    fn screenshot(url: &str) -> Screenshot {
        Screenshot {
            image: url.to_string(),
        }
    }

    #[test]
    fn hero_prefers_background() {
        let mut record = GameRecord::new(1, "Celeste");
        record.background_image = Some("bg.jpg".to_string());
        record.short_screenshots = vec![screenshot("s1.jpg")];
        assert_eq!(hero_image(&record), Some("bg.jpg"));
    }

    #[test]
    fn hero_falls_back_to_first_screenshot() {
        let mut record = GameRecord::new(1, "Celeste");
        record.background_image = Some(String::new());
        record.short_screenshots = vec![screenshot("s1.jpg"), screenshot("s2.jpg")];
        assert_eq!(hero_image(&record), Some("s1.jpg"));
    }

    #[test]
    fn hero_omitted_without_sources() {
        let record = GameRecord::new(1, "Celeste");
        assert_eq!(hero_image(&record), None);
    }

    #[test]
    fn text_fallbacks() {
        let mut record = GameRecord::new(1, "  ");
        assert_eq!(display_name(&record), NAME_UNAVAILABLE);
        assert_eq!(display_release(&record), RELEASE_UNAVAILABLE);

        record.name = "Celeste".to_string();
        record.released = Some("2018-01-25".to_string());
        assert_eq!(display_name(&record), "Celeste");
        assert_eq!(display_release(&record), "2018-01-25");
        assert_eq!(release_date(&record), NaiveDate::from_ymd_opt(2018, 1, 25));
    }

    #[test]
    fn malformed_release_does_not_parse() {
        let mut record = GameRecord::new(1, "Celeste");
        record.released = Some("TBA".to_string());
        assert_eq!(release_date(&record), None);
        assert_eq!(display_release(&record), "TBA");
    }
}
