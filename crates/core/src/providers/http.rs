use async_trait::async_trait;
use reqwest::{Client, Response, Url};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;
use tracing::debug;

use crate::errors::CoreError;
use crate::models::identity::Identity;
use crate::models::quote::PortfolioSnapshot;
use crate::models::settings::ClientSettings;
use crate::models::stock::{HistoryPeriod, IndexQuote, StockDetail};
use super::traits::MarketDataService;

/// HTTP client for the dashboard's market-data backend.
///
/// - `GET    /user-portfolio?email=…`   → portfolio + top gainers/losers
/// - `POST   /add-stock`                → `{email, stock_symbol}`
/// - `DELETE /delete-stock`             → `{email, stock_symbol}`
/// - `GET    /api/stock/{symbol}?period=…` → metadata + history
/// - `GET    /stock_indices`            → index levels
///
/// Mutation response bodies are never read beyond the status code.
pub struct HttpMarketDataService {
    client: Client,
    base_url: Url,
}

impl HttpMarketDataService {
    pub fn new(settings: &ClientSettings) -> Result<Self, CoreError> {
        settings.validate()?;
        let builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(Duration::from_secs(settings.timeout_secs));
        let client = builder
            .build()
            .map_err(|e| CoreError::InvalidConfig(format!("Failed to build HTTP client: {e}")))?;
        Self::with_client(client, settings)
    }

    /// Use a caller-provided `reqwest::Client` (shared connection pool, custom TLS, ...).
    pub fn with_client(client: Client, settings: &ClientSettings) -> Result<Self, CoreError> {
        let base_url = Url::parse(settings.normalized_base_url())
            .map_err(|e| CoreError::InvalidConfig(format!("Invalid base_url: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(CoreError::InvalidConfig(format!(
                "base_url cannot be used as a base: {base_url}"
            )));
        }
        Ok(Self { client, base_url })
    }

    /// Base address requests are resolved against.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // `with_client` rejects cannot-be-a-base URLs, so this always succeeds.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}

// ── Wire types ──────────────────────────────────────────────────────

#[derive(Serialize)]
struct StockRequest<'a> {
    email: &'a str,
    stock_symbol: &'a str,
}

#[derive(Deserialize)]
struct IndexFields {
    current_price: Option<f64>,
    change_percent: Option<f64>,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
    message: Option<String>,
}

/// Turn a non-2xx response into `CoreError::Api`, preferring the server's
/// `error`/`message` field over the raw body.
async fn check_status(resp: Response) -> Result<Response, CoreError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&body)
        .ok()
        .and_then(|b| b.error.or(b.message))
        .unwrap_or(body);
    Err(CoreError::Api {
        status: status.as_u16(),
        message,
    })
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl MarketDataService for HttpMarketDataService {
    fn name(&self) -> &str {
        "HTTP market data"
    }

    async fn get_portfolio_snapshot(
        &self,
        identity: &Identity,
    ) -> Result<PortfolioSnapshot, CoreError> {
        let url = self.endpoint(&["user-portfolio"]);
        debug!(%url, "requesting portfolio snapshot");

        let resp = self
            .client
            .get(url)
            .query(&[("email", identity.email.as_str())])
            .send()
            .await?;

        check_status(resp)
            .await?
            .json::<PortfolioSnapshot>()
            .await
            .map_err(|e| CoreError::Deserialization(format!("Failed to parse portfolio snapshot: {e}")))
    }

    async fn add_stock(&self, identity: &Identity, symbol: &str) -> Result<(), CoreError> {
        let url = self.endpoint(&["add-stock"]);
        debug!(%url, symbol, "adding stock");

        let resp = self
            .client
            .post(url)
            .json(&StockRequest {
                email: &identity.email,
                stock_symbol: symbol,
            })
            .send()
            .await?;

        check_status(resp).await.map(|_| ())
    }

    async fn delete_stock(&self, identity: &Identity, symbol: &str) -> Result<(), CoreError> {
        let url = self.endpoint(&["delete-stock"]);
        debug!(%url, symbol, "deleting stock");

        let resp = self
            .client
            .delete(url)
            .json(&StockRequest {
                email: &identity.email,
                stock_symbol: symbol,
            })
            .send()
            .await?;

        check_status(resp).await.map(|_| ())
    }

    async fn get_stock_detail(
        &self,
        symbol: &str,
        period: HistoryPeriod,
    ) -> Result<StockDetail, CoreError> {
        let url = self.endpoint(&["api", "stock", symbol]);
        debug!(%url, %period, "requesting stock detail");

        let resp = self
            .client
            .get(url)
            .query(&[("period", period.as_str())])
            .send()
            .await?;

        check_status(resp)
            .await?
            .json::<StockDetail>()
            .await
            .map_err(|e| CoreError::Deserialization(format!("Failed to parse stock detail for {symbol}: {e}")))
    }

    async fn get_indices(&self) -> Result<Vec<IndexQuote>, CoreError> {
        let url = self.endpoint(&["stock_indices"]);
        debug!(%url, "requesting indices");

        let resp = self.client.get(url).send().await?;
        let raw: HashMap<String, IndexFields> = check_status(resp)
            .await?
            .json()
            .await
            .map_err(|e| CoreError::Deserialization(format!("Failed to parse indices: {e}")))?;

        let mut quotes: Vec<IndexQuote> = raw
            .into_iter()
            .map(|(ticker, f)| IndexQuote {
                ticker,
                current_price: f.current_price,
                change_percent: f.change_percent,
            })
            .collect();
        quotes.sort_by(|a, b| a.ticker.cmp(&b.ticker));
        Ok(quotes)
    }
}
