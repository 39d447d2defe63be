//! Search lifecycle.

/// Single-state query controller.
pub mod controller;

pub use controller::{
    PendingSearch, QueryController, SearchState, StalePolicy, RESULTS_PER_SEARCH,
};
