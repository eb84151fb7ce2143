pub mod errors;
pub mod models;
pub mod providers;
pub mod reference;
pub mod services;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use models::{
    identity::Identity,
    quote::{MoverEntry, PortfolioEntry},
    reference::ReferenceEntry,
    settings::ClientSettings,
    stock::{HistoryPeriod, IndexQuote, StockDetail},
    view_state::ViewState,
};
use providers::{http::HttpMarketDataService, traits::MarketDataService};
use reference::table::ReferenceTable;
use services::{typeahead, watchlist_store::WatchlistStore};
use tracing::{debug, warn};

use errors::CoreError;

/// Message shown when a stock's detail page cannot be loaded.
pub const STOCK_NOT_FOUND_MESSAGE: &str =
    "Stock not found. Check the name again (e.g., SUZLON, MTNL).";

/// Message shown when the market indices cannot be loaded.
pub const INDICES_FAILED_MESSAGE: &str = "Error fetching stock indices data. Please try again.";

#[derive(Debug, Default)]
struct SearchState {
    reference: ReferenceTable,
    search_text: String,
    suggestions: Vec<ReferenceEntry>,
    pending_symbol: String,
}

/// Main entry point for the dashboard view.
///
/// Turns user intent (typing, picking a suggestion, add, delete) into calls
/// on the typeahead matcher and the [`WatchlistStore`], and holds the purely
/// presentational search state. The watchlist collections and the view state
/// belong to the store; the dashboard only reads them.
///
/// Every method takes `&self`, so the view stays readable while an add or
/// delete is in flight.
#[must_use]
pub struct Dashboard {
    store: WatchlistStore,
    search: Mutex<SearchState>,
}

impl std::fmt::Debug for Dashboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let search = self.search();
        f.debug_struct("Dashboard")
            .field("store", &self.store)
            .field("reference_rows", &search.reference.len())
            .field("search_text", &search.search_text)
            .field("suggestions", &search.suggestions.len())
            .field("pending_symbol", &search.pending_symbol)
            .finish()
    }
}

impl Dashboard {
    /// Create a dashboard backed by any market-data service.
    /// The reference table starts empty until [`Dashboard::set_reference_table`].
    pub fn new(service: Arc<dyn MarketDataService>) -> Self {
        Self {
            store: WatchlistStore::new(service),
            search: Mutex::new(SearchState::default()),
        }
    }

    /// Create a dashboard talking HTTP to the service described by `settings`.
    pub fn from_settings(settings: &ClientSettings) -> Result<Self, CoreError> {
        let service = HttpMarketDataService::new(settings)?;
        Ok(Self::new(Arc::new(service)))
    }

    // ── Reference table ─────────────────────────────────────────────

    /// Install the symbol table once it has loaded. Loading happens
    /// independently of the watchlist; until then search finds nothing.
    pub fn set_reference_table(&self, table: ReferenceTable) {
        debug!(rows = table.len(), "reference table installed");
        self.search().reference = table;
    }

    // ── Watchlist ───────────────────────────────────────────────────

    /// Initial load, run when the user's identity becomes available.
    pub async fn initial_load(&self, identity: Option<&Identity>) -> Result<(), CoreError> {
        let identity = require_identity(identity)?;
        self.store.load(identity).await
    }

    /// Add the pending symbol to the watchlist.
    ///
    /// With no pending symbol this does nothing (the input is not cleared).
    /// Otherwise the search text is cleared once the store call completes,
    /// whether it succeeded or not; the pending symbol is only cleared on
    /// success.
    pub async fn confirm_add(&self, identity: Option<&Identity>) -> Result<(), CoreError> {
        let symbol = self.search().pending_symbol.clone();
        if symbol.is_empty() {
            debug!("add ignored: nothing selected");
            return Ok(());
        }
        let identity = require_identity(identity)?;

        let result = self.store.add(identity, &symbol).await;

        let mut search = self.search();
        if result.is_ok() {
            search.pending_symbol.clear();
        }
        search.search_text.clear();
        result
    }

    /// Remove a watchlist row. No confirmation step.
    pub async fn delete(&self, identity: Option<&Identity>, symbol: &str) -> Result<(), CoreError> {
        let identity = require_identity(identity)?;
        self.store.delete(identity, symbol).await
    }

    // ── Search ──────────────────────────────────────────────────────

    /// Handle a change of the search box contents.
    pub fn on_search_input(&self, text: impl Into<String>) {
        let mut guard = self.search();
        let search = &mut *guard;
        search.search_text = text.into();
        search.suggestions = if search.search_text.is_empty() {
            Vec::new()
        } else {
            typeahead::find_matches(&search.search_text, search.reference.entries())
        };
    }

    /// Pick a suggestion: it becomes the pending symbol and the search box
    /// shows its symbol (not its company name).
    pub fn select_suggestion(&self, suggestion: &ReferenceEntry) {
        self.select_symbol(&suggestion.symbol);
    }

    /// Use a raw symbol as the pending addition, as if picked from the list.
    pub fn select_symbol(&self, symbol: &str) {
        let mut search = self.search();
        search.pending_symbol = symbol.to_string();
        search.suggestions.clear();
        search.search_text = symbol.to_string();
    }

    #[must_use]
    pub fn search_text(&self) -> String {
        self.search().search_text.clone()
    }

    #[must_use]
    pub fn suggestions(&self) -> Vec<ReferenceEntry> {
        self.search().suggestions.clone()
    }

    #[must_use]
    pub fn pending_symbol(&self) -> String {
        self.search().pending_symbol.clone()
    }

    // ── View ────────────────────────────────────────────────────────

    #[must_use]
    pub fn view_state(&self) -> ViewState {
        self.store.view_state()
    }

    /// Whether the Add control should be enabled.
    #[must_use]
    pub fn can_add(&self) -> bool {
        self.store.view_state().can_mutate() && !self.search().pending_symbol.is_empty()
    }

    /// Whether row Delete controls should be enabled.
    #[must_use]
    pub fn can_delete(&self) -> bool {
        self.store.view_state().can_mutate()
    }

    #[must_use]
    pub fn portfolio(&self) -> Vec<PortfolioEntry> {
        self.store.portfolio()
    }

    #[must_use]
    pub fn top_gainers(&self) -> Vec<MoverEntry> {
        self.store.top_gainers()
    }

    #[must_use]
    pub fn top_losers(&self) -> Vec<MoverEntry> {
        self.store.top_losers()
    }

    // ── Market data (fetch-and-return) ──────────────────────────────

    /// Metadata and price history for one symbol. Does not touch the
    /// watchlist view state.
    pub async fn stock_detail(
        &self,
        symbol: &str,
        period: HistoryPeriod,
    ) -> Result<StockDetail, CoreError> {
        let symbol = symbol.to_uppercase();
        match self.store.service().get_stock_detail(&symbol, period).await {
            Ok(detail) if !detail.info.is_empty() => Ok(detail),
            Ok(_) => {
                warn!(symbol = %symbol, "stock detail has no metadata");
                Err(CoreError::LoadFailure(STOCK_NOT_FOUND_MESSAGE.to_string()))
            }
            Err(e) => {
                warn!(symbol = %symbol, error = %e, "stock detail failed");
                Err(CoreError::LoadFailure(STOCK_NOT_FOUND_MESSAGE.to_string()))
            }
        }
    }

    /// Latest market index levels, sorted by ticker.
    pub async fn indices(&self) -> Result<Vec<IndexQuote>, CoreError> {
        self.store.service().get_indices().await.map_err(|e| {
            warn!(error = %e, "indices fetch failed");
            CoreError::LoadFailure(INDICES_FAILED_MESSAGE.to_string())
        })
    }
}

impl Dashboard {
    fn search(&self) -> MutexGuard<'_, SearchState> {
        // The guard is never held across an await.
        self.search.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn require_identity(identity: Option<&Identity>) -> Result<&Identity, CoreError> {
    identity.ok_or(CoreError::NotAuthenticated)
}
