//! Catalog record models.
//!
//! Field names follow the RAWG `games` payload so a search result
//! deserializes straight into a [`GameRecord`].

use serde::{Deserialize, Serialize};

/// One catalog entry as returned by a search query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    /// Catalog identifier.
    pub id: i64,
    /// Game title.
    #[serde(default, deserialize_with = "nullable_default")]
    pub name: String,
    /// Release date as reported by the catalog (`YYYY-MM-DD`).
    #[serde(default)]
    pub released: Option<String>,
    /// Average user rating on a 0–5 scale.
    #[serde(default, deserialize_with = "nullable_default")]
    pub rating: f64,
    /// Metacritic score on a 0–100 scale.
    #[serde(default)]
    pub metacritic: Option<i64>,
    /// Average playtime in hours.
    #[serde(default)]
    pub playtime: Option<u32>,
    /// Genre labels.
    #[serde(default, deserialize_with = "nullable_default")]
    pub genres: Vec<Genre>,
    /// Platforms the game was released on.
    #[serde(default, deserialize_with = "nullable_default")]
    pub platforms: Vec<PlatformEntry>,
    /// Storefronts selling the game.
    #[serde(default, deserialize_with = "nullable_default")]
    pub stores: Vec<StoreEntry>,
    /// ESRB content rating.
    #[serde(default)]
    pub esrb_rating: Option<EsrbRating>,
    /// User-contributed tags.
    #[serde(default, deserialize_with = "nullable_default")]
    pub tags: Vec<Tag>,
    /// Screenshot thumbnails.
    #[serde(default, deserialize_with = "nullable_default")]
    pub short_screenshots: Vec<Screenshot>,
    /// Primary background/cover image.
    #[serde(default)]
    pub background_image: Option<String>,
}

impl GameRecord {
    /// Create a record with only an identifier and a name set.
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            released: None,
            rating: 0.0,
            metacritic: None,
            playtime: None,
            genres: Vec::new(),
            platforms: Vec::new(),
            stores: Vec::new(),
            esrb_rating: None,
            tags: Vec::new(),
            short_screenshots: Vec::new(),
            background_image: None,
        }
    }

    /// Raw platform names in catalog order.
    pub fn platform_names(&self) -> Vec<&str> {
        self.platforms
            .iter()
            .map(|entry| entry.platform.name.as_str())
            .collect()
    }

    /// Store names in catalog order.
    pub fn store_names(&self) -> Vec<&str> {
        self.stores
            .iter()
            .map(|entry| entry.store.name.as_str())
            .collect()
    }

    /// ESRB label, if any.
    pub fn content_rating_label(&self) -> Option<&str> {
        self.esrb_rating.as_ref().map(|rating| rating.name.as_str())
    }
}

/// Genre label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    /// Display name.
    #[serde(default, deserialize_with = "nullable_default")]
    pub name: String,
}

/// Wrapper matching the `{ "platform": { "name": .. } }` shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformEntry {
    /// The platform itself.
    pub platform: NamedRef,
}

/// Wrapper matching the `{ "store": { "name": .. } }` shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreEntry {
    /// The store itself.
    pub store: NamedRef,
}

/// Nested catalog object of which only the name is kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedRef {
    /// Display name.
    #[serde(default, deserialize_with = "nullable_default")]
    pub name: String,
}

/// ESRB rating object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EsrbRating {
    /// Label such as `"Mature"`.
    #[serde(default, deserialize_with = "nullable_default")]
    pub name: String,
}

/// Tag label with the language it was contributed in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    /// Tag label.
    #[serde(default, deserialize_with = "nullable_default")]
    pub name: String,
    /// Three-letter language code, e.g. `eng`.
    #[serde(default, deserialize_with = "nullable_default")]
    pub language: String,
}

impl Tag {
    /// Build a tag from its label and language code.
    pub fn new(name: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            language: language.into(),
        }
    }
}

/// Screenshot thumbnail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Screenshot {
    /// Image URL.
    #[serde(default, deserialize_with = "nullable_default")]
    pub image: String,
}

impl From<&str> for PlatformEntry {
    fn from(name: &str) -> Self {
        Self {
            platform: NamedRef {
                name: name.to_string(),
            },
        }
    }
}

impl From<&str> for StoreEntry {
    fn from(name: &str) -> Self {
        Self {
            store: NamedRef {
                name: name.to_string(),
            },
        }
    }
}

/// Treat an explicit `null` the same as a missing field.
fn nullable_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
