#![warn(clippy::all, missing_docs)]

//! Core logic for gamedex.
//!
//! This crate hosts configuration, the catalog client, the single-state
//! query controller, and the normalizer that turns a raw catalog record
//! into presentation-ready groupings for the terminal UI and any future
//! frontends.

pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod normalize;
pub mod search;

pub use catalog::{CatalogClient, RawgClient};
pub use config::AppConfig;
pub use error::{CatalogError, SearchError};
pub use models::GameRecord;
pub use normalize::GameSummary;
pub use search::{PendingSearch, QueryController, SearchState, StalePolicy};
