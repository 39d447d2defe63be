use crate::models::Tag;

/// Tags contributed in this language are hidden.
pub const EXCLUDED_TAG_LANGUAGE: &str = "rus";
/// Maximum number of tags shown.
pub const MAX_VISIBLE_TAGS: usize = 10;

/// First [`MAX_VISIBLE_TAGS`] tags not in [`EXCLUDED_TAG_LANGUAGE`], original order.
pub fn visible_tags(tags: &[Tag]) -> Vec<&Tag> {
    tags.iter()
        .filter(|tag| tag.language != EXCLUDED_TAG_LANGUAGE)
        .take(MAX_VISIBLE_TAGS)
        .collect()
}
