//! Outbound catalog access.

/// reqwest-backed RAWG client.
pub mod rawg;

use async_trait::async_trait;

use crate::{error::CatalogError, models::GameRecord};

pub use rawg::RawgClient;

/// Search capability consumed by the query controller.
#[async_trait]
pub trait CatalogClient: Send + Sync {
    /// Return up to `page_size` records matching `term`, best match first.
    async fn search(&self, term: &str, page_size: u32) -> Result<Vec<GameRecord>, CatalogError>;
}
