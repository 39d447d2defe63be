//! Error types for catalog access and the search lifecycle.

use reqwest::StatusCode;
use thiserror::Error;

/// Message shown when a search returns no records.
pub const NOT_FOUND_MESSAGE: &str = "No game found with that name.";
/// Message shown for any transport, status, or decoding failure.
pub const TRANSPORT_MESSAGE: &str = "An error occurred while fetching the game data.";

/// User-facing outcome of a failed search.
///
/// Both variants are terminal for one search only; the controller keeps
/// accepting new queries afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SearchError {
    /// The catalog returned zero records.
    #[error("{}", NOT_FOUND_MESSAGE)]
    NotFound,
    /// The request could not be issued or its response could not be read.
    #[error("{}", TRANSPORT_MESSAGE)]
    Transport,
}

impl SearchError {
    /// Fixed, non-technical message for display.
    pub fn message(&self) -> &'static str {
        match self {
            SearchError::NotFound => NOT_FOUND_MESSAGE,
            SearchError::Transport => TRANSPORT_MESSAGE,
        }
    }
}

/// Internal failure cause reported by a [`crate::catalog::CatalogClient`].
///
/// Only logged; callers of the controller see [`SearchError::Transport`].
#[derive(Debug, Error)]
pub enum CatalogError {
    /// No credential was configured.
    #[error("no API key configured")]
    MissingApiKey,
    /// Connection, timeout, or body read failure.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// Non-success HTTP status, including authorization and rate limiting.
    #[error("catalog responded with status {0}")]
    Status(StatusCode),
    /// Body was not a valid search response.
    #[error("failed to decode catalog response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl From<CatalogError> for SearchError {
    fn from(_: CatalogError) -> Self {
        SearchError::Transport
    }
}
