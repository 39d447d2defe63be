use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::{catalog::CatalogClient, error::SearchError, models::GameRecord};

/// Only the top match is ever displayed.
pub const RESULTS_PER_SEARCH: u32 = 1;

/// Current phase of the search lifecycle. Exactly one is active at a time.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SearchState {
    /// No search has been issued yet.
    #[default]
    Idle,
    /// A search is in flight; any previous result or error is cleared.
    Loading,
    /// The top match of the latest applied search.
    Success(GameRecord),
    /// The latest applied search failed.
    Failure(SearchError),
}

impl SearchState {
    /// Whether a search is in flight.
    pub fn is_loading(&self) -> bool {
        matches!(self, SearchState::Loading)
    }

    /// Record held by a successful search.
    pub fn record(&self) -> Option<&GameRecord> {
        match self {
            SearchState::Success(record) => Some(record),
            _ => None,
        }
    }

    /// Error held by a failed search.
    pub fn error(&self) -> Option<SearchError> {
        match self {
            SearchState::Failure(err) => Some(*err),
            _ => None,
        }
    }
}

/// How responses from overlapping searches are reconciled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StalePolicy {
    /// Drop a response when a newer search has started since it was issued.
    #[default]
    LatestOnly,
    /// Apply every response as it arrives; the last one to land wins.
    LastWriteWins,
}

struct Slot {
    state: SearchState,
    generation: u64,
}

struct Inner {
    client: Arc<dyn CatalogClient>,
    policy: StalePolicy,
    slot: RwLock<Slot>,
}

impl Inner {
    fn apply(&self, generation: u64, outcome: SearchState) -> bool {
        let mut slot = self.slot.write();
        if self.policy == StalePolicy::LatestOnly && generation < slot.generation {
            debug!(
                generation,
                latest = slot.generation,
                "Discarding superseded search response"
            );
            return false;
        }
        slot.state = outcome;
        true
    }
}

/// Owner of the single search state.
///
/// Cloning is cheap and every clone observes the same state, so the view
/// can hand the controller to spawned tasks.
#[derive(Clone)]
pub struct QueryController {
    inner: Arc<Inner>,
}

impl QueryController {
    /// Create an idle controller querying `client`.
    pub fn new(client: Arc<dyn CatalogClient>, policy: StalePolicy) -> Self {
        Self {
            inner: Arc::new(Inner {
                client,
                policy,
                slot: RwLock::new(Slot {
                    state: SearchState::Idle,
                    generation: 0,
                }),
            }),
        }
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> SearchState {
        self.inner.slot.read().state.clone()
    }

    /// Number of searches started so far.
    pub fn generation(&self) -> u64 {
        self.inner.slot.read().generation
    }

    /// Policy applied to overlapping searches.
    pub fn policy(&self) -> StalePolicy {
        self.inner.policy
    }

    /// Start a search without issuing the request yet.
    ///
    /// Blank queries return `None` and leave the state untouched. Otherwise the
    /// state is `Loading` when this returns and the request runs when the
    /// returned [`PendingSearch`] is resolved.
    pub fn begin(&self, query: &str) -> Option<PendingSearch> {
        let query = query.trim();
        if query.is_empty() {
            return None;
        }

        let generation = {
            let mut slot = self.inner.slot.write();
            slot.generation += 1;
            slot.state = SearchState::Loading;
            slot.generation
        };
        info!(query, generation, "Search started");

        Some(PendingSearch {
            inner: Arc::clone(&self.inner),
            query: query.to_string(),
            generation,
        })
    }

    /// Run a full search and return the state observed once it settles.
    ///
    /// Blank queries are a no-op and return the unchanged state.
    pub async fn submit(&self, query: &str) -> SearchState {
        if let Some(pending) = self.begin(query) {
            pending.resolve().await;
        }
        self.state()
    }
}

/// A started search whose request has not completed yet.
pub struct PendingSearch {
    inner: Arc<Inner>,
    query: String,
    generation: u64,
}

impl PendingSearch {
    /// Trimmed query sent to the catalog.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Sequence number assigned when the search started.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Issue the request and apply the terminal state.
    ///
    /// Returns `false` when the outcome was discarded as stale.
    pub async fn resolve(self) -> bool {
        let outcome = match self
            .inner
            .client
            .search(&self.query, RESULTS_PER_SEARCH)
            .await
        {
            Ok(records) => match records.into_iter().next() {
                Some(record) => {
                    info!(query = %self.query, id = record.id, name = %record.name, "Search matched");
                    SearchState::Success(record)
                }
                None => {
                    info!(query = %self.query, "Search returned no results");
                    SearchState::Failure(SearchError::NotFound)
                }
            },
            Err(err) => {
                warn!(query = %self.query, error = %err, "Catalog request failed");
                SearchState::Failure(err.into())
            }
        };

        self.inner.apply(self.generation, outcome)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use async_trait::async_trait;
    use parking_lot::Mutex;
    use reqwest::StatusCode;

    use super::*;
    use crate::{
        error::{CatalogError, NOT_FOUND_MESSAGE},
        models::EsrbRating,
        normalize::{ContentRatingIcon, GameSummary, PlatformFamily, RatingTier},
    };

    enum Reply {
        Records(Vec<GameRecord>),
        Unauthorized,
    }

    #[derive(Default)]
    struct StubCatalog {
        replies: HashMap<String, Reply>,
        calls: Mutex<Vec<(String, u32)>>,
    }

    impl StubCatalog {
        fn with(mut self, term: &str, reply: Reply) -> Self {
            self.replies.insert(term.to_string(), reply);
            self
        }

        fn calls(&self) -> Vec<(String, u32)> {
            self.calls.lock().clone()
        }
    }

    #[async_trait]
    impl CatalogClient for StubCatalog {
        async fn search(
            &self,
            term: &str,
            page_size: u32,
        ) -> Result<Vec<GameRecord>, CatalogError> {
            self.calls.lock().push((term.to_string(), page_size));
            match self.replies.get(term) {
                Some(Reply::Records(records)) => Ok(records.clone()),
                Some(Reply::Unauthorized) => Err(CatalogError::Status(StatusCode::UNAUTHORIZED)),
                None => Ok(Vec::new()),
            }
        }
    }

    fn halo() -> GameRecord {
        let mut record = GameRecord::new(1, "Halo Infinite");
        record.rating = 4.5;
        record.metacritic = Some(87);
        record.esrb_rating = Some(EsrbRating {
            name: "Mature".to_string(),
        });
        record.platforms = vec!["Xbox One".into(), "PC".into()];
        record
    }

    fn controller(stub: StubCatalog, policy: StalePolicy) -> (QueryController, Arc<StubCatalog>) {
        let stub = Arc::new(stub);
        let client: Arc<dyn CatalogClient> = stub.clone();
        (QueryController::new(client, policy), stub)
    }

    #[tokio::test]
    async fn starts_idle() {
        let (controller, _) = controller(StubCatalog::default(), StalePolicy::default());
        assert_eq!(controller.state(), SearchState::Idle);
        assert_eq!(controller.generation(), 0);
    }

    #[tokio::test]
    async fn blank_queries_are_ignored() {
        let (controller, stub) = controller(StubCatalog::default(), StalePolicy::default());
        assert!(controller.begin("").is_none());
        assert_eq!(controller.submit("   ").await, SearchState::Idle);
        assert_eq!(controller.generation(), 0);
        assert!(stub.calls().is_empty());
    }

    #[tokio::test]
    async fn loading_is_visible_before_result() {
        let stub = StubCatalog::default().with("Halo", Reply::Records(vec![halo()]));
        let (controller, _) = controller(stub, StalePolicy::default());

        let pending = controller.begin("Halo").expect("search starts");
        assert!(controller.state().is_loading());
        assert!(pending.resolve().await);
        assert_eq!(controller.state().record().map(|r| r.id), Some(1));
    }

    #[tokio::test]
    async fn success_exposes_normalized_top_match() {
        let mut other = GameRecord::new(2, "Halo 3");
        other.rating = 1.0;
        let stub = StubCatalog::default().with("Halo", Reply::Records(vec![halo(), other]));
        let (controller, stub) = controller(stub, StalePolicy::default());

        let state = controller.submit("  Halo  ").await;
        assert_eq!(stub.calls(), vec![("Halo".to_string(), RESULTS_PER_SEARCH)]);

        let record = state.record().expect("success");
        assert_eq!(record.name, "Halo Infinite");
        let summary = GameSummary::from_record(record);
        assert_eq!(summary.rating_tier, RatingTier::High);
        assert_eq!(summary.metacritic_tier, Some(RatingTier::High));
        assert_eq!(summary.content_rating, Some(ContentRatingIcon::Mature));
        assert_eq!(
            summary.platforms.get(PlatformFamily::Xbox),
            Some(&["Xbox One".to_string()][..])
        );
        assert_eq!(
            summary.platforms.get(PlatformFamily::Pc),
            Some(&["PC".to_string()][..])
        );
        assert_eq!(summary.platforms.len(), 2);
    }

    #[tokio::test]
    async fn empty_results_are_not_found() {
        let (controller, _) = controller(StubCatalog::default(), StalePolicy::default());
        let state = controller.submit("zzzNoSuchGame").await;
        assert_eq!(state, SearchState::Failure(SearchError::NotFound));
        assert_eq!(state.error().map(|e| e.message()), Some(NOT_FOUND_MESSAGE));
        assert!(state.record().is_none());
    }

    #[tokio::test]
    async fn transport_failure_hides_cause_and_allows_retry() {
        let stub = StubCatalog::default()
            .with("Halo", Reply::Records(vec![halo()]))
            .with("broken", Reply::Unauthorized);
        let (controller, _) = controller(stub, StalePolicy::default());

        let state = controller.submit("broken").await;
        assert_eq!(state, SearchState::Failure(SearchError::Transport));

        let state = controller.submit("Halo").await;
        assert!(state.record().is_some());
    }

    #[tokio::test]
    async fn new_search_clears_previous_result() {
        let stub = StubCatalog::default().with("Halo", Reply::Records(vec![halo()]));
        let (controller, _) = controller(stub, StalePolicy::default());

        controller.submit("Halo").await;
        let pending = controller.begin("Portal").expect("search starts");
        assert_eq!(controller.state(), SearchState::Loading);
        pending.resolve().await;
        assert_eq!(controller.state(), SearchState::Failure(SearchError::NotFound));
    }

    #[tokio::test]
    async fn latest_only_discards_superseded_response() {
        let stub = StubCatalog::default()
            .with("Halo", Reply::Records(vec![halo()]))
            .with("Portal", Reply::Records(vec![GameRecord::new(2, "Portal")]));
        let (controller, _) = controller(stub, StalePolicy::LatestOnly);

        let first = controller.begin("Halo").expect("search starts");
        let second = controller.begin("Portal").expect("search starts");
        assert_eq!(second.generation(), first.generation() + 1);

        assert!(second.resolve().await);
        assert!(!first.resolve().await);
        assert_eq!(controller.state().record().map(|r| r.id), Some(2));
    }

    #[tokio::test]
    async fn last_write_wins_applies_late_response() {
        let stub = StubCatalog::default()
            .with("Halo", Reply::Records(vec![halo()]))
            .with("Portal", Reply::Records(vec![GameRecord::new(2, "Portal")]));
        let (controller, _) = controller(stub, StalePolicy::LastWriteWins);

        let first = controller.begin("Halo").expect("search starts");
        let second = controller.begin("Portal").expect("search starts");

        assert!(second.resolve().await);
        assert!(first.resolve().await);
        assert_eq!(controller.state().record().map(|r| r.id), Some(1));
    }

    #[tokio::test]
    async fn clones_share_state() {
        let stub = StubCatalog::default().with("Halo", Reply::Records(vec![halo()]));
        let (controller, _) = controller(stub, StalePolicy::default());
        let view = controller.clone();

        let task = tokio::spawn({
            let controller = controller.clone();
            async move { controller.submit("Halo").await }
        });
        task.await.expect("task completes");
        assert!(view.state().record().is_some());
    }
}
