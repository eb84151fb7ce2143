use serde::{Deserialize, Serialize};

/// One line of the user's watchlist, as reported by the market-data service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioEntry {
    /// The symbol as stored server-side (e.g. "INFY").
    pub name: String,
    pub current_price: f64,
    /// Server-side next-day forecast, when the service computed one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub predicted_short_term_price: Option<f64>,
    /// Server-side 30-day forecast, when the service computed one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub predicted_long_term_price: Option<f64>,
}

impl PortfolioEntry {
    pub fn new(name: impl Into<String>, current_price: f64) -> Self {
        Self {
            name: name.into(),
            current_price,
            predicted_short_term_price: None,
            predicted_long_term_price: None,
        }
    }
}

/// A market-wide top gainer or loser.
///
/// Same wire shape as [`PortfolioEntry`], but not owned by the user and
/// never edited through the watchlist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoverEntry {
    pub name: String,
    pub current_price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub predicted_short_term_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub predicted_long_term_price: Option<f64>,
}

impl MoverEntry {
    pub fn new(name: impl Into<String>, current_price: f64) -> Self {
        Self {
            name: name.into(),
            current_price,
            predicted_short_term_price: None,
            predicted_long_term_price: None,
        }
    }
}

/// Full response of the portfolio snapshot call.
///
/// A list missing from the response deserializes as empty, so a snapshot
/// always replaces all three collections.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSnapshot {
    #[serde(default)]
    pub portfolio: Vec<PortfolioEntry>,
    #[serde(default)]
    pub top_gainers: Vec<MoverEntry>,
    #[serde(default)]
    pub top_losers: Vec<MoverEntry>,
}
