// Shared test helpers: an in-memory market-data service that records calls.
#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

use watchlist_core::errors::CoreError;
use watchlist_core::models::identity::Identity;
use watchlist_core::models::quote::{MoverEntry, PortfolioEntry, PortfolioSnapshot};
use watchlist_core::models::stock::{HistoryPeriod, IndexQuote, StockDetail};
use watchlist_core::providers::traits::MarketDataService;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn user() -> Identity {
    Identity::new("investor@example.com")
}

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Snapshot(String),
    Add(String, String),
    Delete(String, String),
    Detail(String, HistoryPeriod),
    Indices,
}

/// Scripted market-data service.
///
/// Each snapshot request pops the next scripted response (`None` = failure);
/// once the script runs out, further snapshot requests fail.
pub struct MockService {
    calls: Mutex<Vec<Call>>,
    snapshots: Mutex<VecDeque<Option<PortfolioSnapshot>>>,
    pub fail_add: bool,
    pub fail_delete: bool,
    pub detail: Option<StockDetail>,
    pub indices: Option<Vec<IndexQuote>>,
}

impl MockService {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            snapshots: Mutex::new(VecDeque::new()),
            fail_add: false,
            fail_delete: false,
            detail: None,
            indices: None,
        }
    }

    pub fn with_snapshots(snapshots: Vec<Option<PortfolioSnapshot>>) -> Self {
        let mock = Self::new();
        *mock.snapshots.lock().unwrap() = snapshots.into();
        mock
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn snapshot_calls(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, Call::Snapshot(_)))
            .count()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl MarketDataService for MockService {
    fn name(&self) -> &str {
        "MockService"
    }

    async fn get_portfolio_snapshot(
        &self,
        identity: &Identity,
    ) -> Result<PortfolioSnapshot, CoreError> {
        self.record(Call::Snapshot(identity.email.clone()));
        match self.snapshots.lock().unwrap().pop_front() {
            Some(Some(snapshot)) => Ok(snapshot),
            _ => Err(CoreError::Api {
                status: 500,
                message: "snapshot unavailable".into(),
            }),
        }
    }

    async fn add_stock(&self, identity: &Identity, symbol: &str) -> Result<(), CoreError> {
        self.record(Call::Add(identity.email.clone(), symbol.to_string()));
        if self.fail_add {
            return Err(CoreError::Network("connection refused".into()));
        }
        Ok(())
    }

    async fn delete_stock(&self, identity: &Identity, symbol: &str) -> Result<(), CoreError> {
        self.record(Call::Delete(identity.email.clone(), symbol.to_string()));
        if self.fail_delete {
            return Err(CoreError::Api {
                status: 404,
                message: "Stock not found in portfolio".into(),
            });
        }
        Ok(())
    }

    async fn get_stock_detail(
        &self,
        symbol: &str,
        period: HistoryPeriod,
    ) -> Result<StockDetail, CoreError> {
        self.record(Call::Detail(symbol.to_string(), period));
        self.detail.clone().ok_or(CoreError::Api {
            status: 404,
            message: "No stock information available".into(),
        })
    }

    async fn get_indices(&self) -> Result<Vec<IndexQuote>, CoreError> {
        self.record(Call::Indices);
        self.indices
            .clone()
            .ok_or_else(|| CoreError::Network("timed out".into()))
    }
}

/// Market-data service whose snapshot responses are held until released.
///
/// Snapshot requests are answered in call order from the scripted queue.
/// Each request signals `entered` and then waits on the gate returned by
/// [`GatedService::push_snapshot`]. Mutations succeed immediately.
pub struct GatedService {
    pub entered: Notify,
    gates: Mutex<VecDeque<(Arc<Notify>, PortfolioSnapshot)>>,
    calls: Mutex<Vec<Call>>,
}

impl GatedService {
    pub fn new() -> Self {
        Self {
            entered: Notify::new(),
            gates: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Script the next snapshot response and return the gate that releases it.
    pub fn push_snapshot(&self, snapshot: PortfolioSnapshot) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.gates.lock().unwrap().push_back((gate.clone(), snapshot));
        gate
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl MarketDataService for GatedService {
    fn name(&self) -> &str {
        "GatedService"
    }

    async fn get_portfolio_snapshot(
        &self,
        identity: &Identity,
    ) -> Result<PortfolioSnapshot, CoreError> {
        self.record(Call::Snapshot(identity.email.clone()));
        let next = self.gates.lock().unwrap().pop_front();
        let Some((gate, snapshot)) = next else {
            return Err(CoreError::Network("no scripted snapshot".into()));
        };
        self.entered.notify_one();
        gate.notified().await;
        Ok(snapshot)
    }

    async fn add_stock(&self, identity: &Identity, symbol: &str) -> Result<(), CoreError> {
        self.record(Call::Add(identity.email.clone(), symbol.to_string()));
        Ok(())
    }

    async fn delete_stock(&self, identity: &Identity, symbol: &str) -> Result<(), CoreError> {
        self.record(Call::Delete(identity.email.clone(), symbol.to_string()));
        Ok(())
    }

    async fn get_stock_detail(&self, _: &str, _: HistoryPeriod) -> Result<StockDetail, CoreError> {
        Ok(StockDetail::default())
    }

    async fn get_indices(&self) -> Result<Vec<IndexQuote>, CoreError> {
        Ok(Vec::new())
    }
}

// ── Fixtures ────────────────────────────────────────────────────────

pub fn snapshot(portfolio: &[(&str, f64)], gainers: &[(&str, f64)], losers: &[(&str, f64)]) -> PortfolioSnapshot {
    PortfolioSnapshot {
        portfolio: portfolio
            .iter()
            .map(|(n, p)| PortfolioEntry::new(*n, *p))
            .collect(),
        top_gainers: gainers.iter().map(|(n, p)| MoverEntry::new(*n, *p)).collect(),
        top_losers: losers.iter().map(|(n, p)| MoverEntry::new(*n, *p)).collect(),
    }
}

pub fn names(entries: &[PortfolioEntry]) -> Vec<&str> {
    entries.iter().map(|e| e.name.as_str()).collect()
}
