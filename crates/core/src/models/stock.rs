use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::errors::CoreError;

/// Look-back window for a per-symbol price history request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum HistoryPeriod {
    #[serde(rename = "1d")]
    OneDay,
    #[serde(rename = "5d")]
    FiveDays,
    #[serde(rename = "1mo")]
    OneMonth,
    #[serde(rename = "5mo")]
    FiveMonths,
    #[default]
    #[serde(rename = "1y")]
    OneYear,
    #[serde(rename = "max")]
    Max,
}

impl HistoryPeriod {
    /// All periods offered by the stock detail view, shortest first.
    pub const ALL: [HistoryPeriod; 6] = [
        HistoryPeriod::OneDay,
        HistoryPeriod::FiveDays,
        HistoryPeriod::OneMonth,
        HistoryPeriod::FiveMonths,
        HistoryPeriod::OneYear,
        HistoryPeriod::Max,
    ];

    /// Query-string value understood by the market-data service.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            HistoryPeriod::OneDay => "1d",
            HistoryPeriod::FiveDays => "5d",
            HistoryPeriod::OneMonth => "1mo",
            HistoryPeriod::FiveMonths => "5mo",
            HistoryPeriod::OneYear => "1y",
            HistoryPeriod::Max => "max",
        }
    }
}

impl std::fmt::Display for HistoryPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for HistoryPeriod {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HistoryPeriod::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| CoreError::InvalidConfig(format!("Unknown history period: {s}")))
    }
}

/// One bar of a symbol's price history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryPoint {
    /// Daily histories use `Date`, intraday ones `Datetime`.
    #[serde(rename = "Date", alias = "Datetime", deserialize_with = "deserialize_timestamp")]
    pub date: DateTime<Utc>,
    #[serde(rename = "Open", default)]
    pub open: f64,
    #[serde(rename = "High", default)]
    pub high: f64,
    #[serde(rename = "Low", default)]
    pub low: f64,
    #[serde(rename = "Close", default)]
    pub close: f64,
    #[serde(rename = "Volume", default)]
    pub volume: f64,
}

/// Accepts HTTP-date (RFC 2822) strings as emitted by the service, and RFC 3339.
fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    DateTime::parse_from_rfc2822(&raw)
        .or_else(|_| DateTime::parse_from_rfc3339(&raw))
        .map(|d| d.with_timezone(&Utc))
        .map_err(|e| serde::de::Error::custom(format!("invalid timestamp {raw:?}: {e}")))
}

/// Metadata plus price history for a single symbol.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StockDetail {
    /// Free-form metadata as returned by the service (sector, long name, ...).
    #[serde(rename = "stock_info", default)]
    pub info: serde_json::Map<String, serde_json::Value>,
    #[serde(rename = "stock_history", default)]
    pub history: Vec<HistoryPoint>,
}

impl StockDetail {
    /// Display name from the metadata, if the service supplied one.
    #[must_use]
    pub fn long_name(&self) -> Option<&str> {
        self.info.get("longName").and_then(|v| v.as_str())
    }

    /// Latest close in the history, if any.
    #[must_use]
    pub fn last_close(&self) -> Option<f64> {
        self.history.last().map(|p| p.close)
    }
}

/// Latest level of a market index. Both values are absent when the service
/// had fewer than two sessions of data for the index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexQuote {
    pub ticker: String,
    pub current_price: Option<f64>,
    pub change_percent: Option<f64>,
}
