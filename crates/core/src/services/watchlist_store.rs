use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, info, warn};

use crate::errors::{CoreError, ADD_FAILED_MESSAGE, DELETE_FAILED_MESSAGE, LOAD_FAILED_MESSAGE};
use crate::models::identity::Identity;
use crate::models::quote::{MoverEntry, PortfolioEntry};
use crate::models::view_state::ViewState;
use crate::providers::traits::MarketDataService;

#[derive(Debug, Default)]
struct StoreState {
    portfolio: Vec<PortfolioEntry>,
    top_gainers: Vec<MoverEntry>,
    top_losers: Vec<MoverEntry>,
    view: ViewState,
}

/// Owns the user's watchlist, the market movers, and the shared view state.
///
/// Consistency policy: the remote service is authoritative. Every successful
/// add or delete is followed by a fresh snapshot request, and only the
/// reloaded portfolio is kept; nothing returned by the mutation itself is
/// trusted. Add/delete refresh the portfolio only, never the movers.
///
/// All three operations share one `ViewState`. Operations take `&self` so the
/// state stays observable while a request is in flight; nothing queues or
/// rejects a second call made while `loading` is set. Callers gate their
/// controls on [`ViewState::can_mutate`].
pub struct WatchlistStore {
    service: Arc<dyn MarketDataService>,
    state: Mutex<StoreState>,
}

impl std::fmt::Debug for WatchlistStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state();
        f.debug_struct("WatchlistStore")
            .field("service", &self.service.name())
            .field("portfolio", &state.portfolio.len())
            .field("top_gainers", &state.top_gainers.len())
            .field("top_losers", &state.top_losers.len())
            .field("view", &state.view)
            .finish()
    }
}

impl WatchlistStore {
    pub fn new(service: Arc<dyn MarketDataService>) -> Self {
        Self {
            service,
            state: Mutex::new(StoreState::default()),
        }
    }

    // ── Operations ──────────────────────────────────────────────────

    /// Initial load: fetch portfolio, top gainers and top losers in one call.
    ///
    /// On success all three collections are replaced together. On failure
    /// they keep their last-known-good contents and the fixed load message
    /// is shown.
    pub async fn load(&self, identity: &Identity) -> Result<(), CoreError> {
        info!("loading portfolio snapshot");
        self.begin();

        let result = self.service.get_portfolio_snapshot(identity).await;

        let mut state = self.state();
        state.view.loading = false;
        match result {
            Ok(snapshot) => {
                info!(
                    portfolio = snapshot.portfolio.len(),
                    gainers = snapshot.top_gainers.len(),
                    losers = snapshot.top_losers.len(),
                    "portfolio snapshot loaded"
                );
                state.portfolio = snapshot.portfolio;
                state.top_gainers = snapshot.top_gainers;
                state.top_losers = snapshot.top_losers;
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "portfolio snapshot failed");
                state.view.error = LOAD_FAILED_MESSAGE.to_string();
                Err(CoreError::LoadFailure(format!("{LOAD_FAILED_MESSAGE}: {e}")))
            }
        }
    }

    /// Add `symbol` (upper-cased) to the watchlist, then reload the portfolio.
    ///
    /// An empty symbol is ignored: no request, no state change, `Ok(())`.
    /// The reload is only issued after the add succeeded.
    pub async fn add(&self, identity: &Identity, symbol: &str) -> Result<(), CoreError> {
        if symbol.is_empty() {
            debug!("add ignored: empty symbol");
            return Ok(());
        }
        let symbol = symbol.to_uppercase();
        info!(symbol = %symbol, "adding stock");
        self.begin();

        let outcome = async {
            self.service.add_stock(identity, &symbol).await?;
            Ok::<_, CoreError>(self.service.get_portfolio_snapshot(identity).await?.portfolio)
        }
        .await;

        self.finish_mutation(outcome, "add stock", ADD_FAILED_MESSAGE)
    }

    /// Remove `symbol` from the watchlist, then reload the portfolio.
    ///
    /// Top gainers/losers are left exactly as they were.
    pub async fn delete(&self, identity: &Identity, symbol: &str) -> Result<(), CoreError> {
        info!(symbol, "deleting stock");
        self.begin();

        let outcome = async {
            self.service.delete_stock(identity, symbol).await?;
            Ok::<_, CoreError>(self.service.get_portfolio_snapshot(identity).await?.portfolio)
        }
        .await;

        self.finish_mutation(outcome, "delete stock", DELETE_FAILED_MESSAGE)
    }

    // ── Read access ─────────────────────────────────────────────────

    #[must_use]
    pub fn portfolio(&self) -> Vec<PortfolioEntry> {
        self.state().portfolio.clone()
    }

    #[must_use]
    pub fn top_gainers(&self) -> Vec<MoverEntry> {
        self.state().top_gainers.clone()
    }

    #[must_use]
    pub fn top_losers(&self) -> Vec<MoverEntry> {
        self.state().top_losers.clone()
    }

    #[must_use]
    pub fn view_state(&self) -> ViewState {
        self.state().view.clone()
    }

    #[must_use]
    pub fn service(&self) -> &Arc<dyn MarketDataService> {
        &self.service
    }

    // ── Internal ────────────────────────────────────────────────────

    fn state(&self) -> MutexGuard<'_, StoreState> {
        // The guard is never held across an await.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn begin(&self) {
        self.state().view.loading = true;
    }

    fn finish_mutation(
        &self,
        outcome: Result<Vec<PortfolioEntry>, CoreError>,
        action: &str,
        user_message: &str,
    ) -> Result<(), CoreError> {
        let mut state = self.state();
        state.view.loading = false;
        match outcome {
            Ok(portfolio) => {
                info!(action, portfolio = portfolio.len(), "portfolio reloaded");
                state.portfolio = portfolio;
                Ok(())
            }
            Err(e) => {
                warn!(action, error = %e, "watchlist mutation failed");
                state.view.error = user_message.to_string();
                Err(CoreError::MutationFailure {
                    action: action.to_string(),
                    message: e.to_string(),
                })
            }
        }
    }
}
