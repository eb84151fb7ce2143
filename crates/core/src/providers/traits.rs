use async_trait::async_trait;

use crate::errors::CoreError;
use crate::models::identity::Identity;
use crate::models::quote::PortfolioSnapshot;
use crate::models::stock::{HistoryPeriod, IndexQuote, StockDetail};

/// The remote market-data service, as seen by the dashboard.
///
/// The service is authoritative for the watchlist: mutations report only
/// success or failure, and callers re-read the snapshot afterwards.
/// Tests swap in in-memory implementations through this trait.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait MarketDataService: Send + Sync {
    /// Human-readable name of this service (for logs/errors).
    fn name(&self) -> &str;

    /// Watchlist plus top gainers and losers, in one call.
    async fn get_portfolio_snapshot(
        &self,
        identity: &Identity,
    ) -> Result<PortfolioSnapshot, CoreError>;

    /// Add `symbol` to the user's watchlist. The symbol is sent as given.
    async fn add_stock(&self, identity: &Identity, symbol: &str) -> Result<(), CoreError>;

    /// Remove `symbol` from the user's watchlist.
    async fn delete_stock(&self, identity: &Identity, symbol: &str) -> Result<(), CoreError>;

    /// Metadata and price history for one symbol.
    async fn get_stock_detail(
        &self,
        symbol: &str,
        period: HistoryPeriod,
    ) -> Result<StockDetail, CoreError>;

    /// Latest levels of the tracked market indices.
    async fn get_indices(&self) -> Result<Vec<IndexQuote>, CoreError>;
}
