use thiserror::Error;

/// User-facing message shown when the portfolio snapshot cannot be loaded.
pub const LOAD_FAILED_MESSAGE: &str = "Failed to fetch portfolio";

/// User-facing message shown when adding a stock (or the reload after it) fails.
pub const ADD_FAILED_MESSAGE: &str = "Failed to add stock";

/// User-facing message shown when deleting a stock (or the reload after it) fails.
pub const DELETE_FAILED_MESSAGE: &str = "Failed to delete stock";

/// Unified error type for the entire watchlist-core library.
/// Every public function returns `Result<T, CoreError>`.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Session ─────────────────────────────────────────────────────
    #[error("No authenticated user")]
    NotAuthenticated,

    // ── Store operations ────────────────────────────────────────────
    #[error("{0}")]
    LoadFailure(String),

    #[error("{action} failed: {message}")]
    MutationFailure { action: String, message: String },

    // ── API / Network ───────────────────────────────────────────────
    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    // ── Reference data / configuration ──────────────────────────────
    #[error("Reference data error: {0}")]
    ReferenceData(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<reqwest::Error> for CoreError {
    fn from(e: reqwest::Error) -> Self {
        // Portfolio requests carry the user's email in the query string.
        let msg = e.to_string();
        let sanitized = if let Some(idx) = msg.find('?') {
            format!("{}?<query redacted>", &msg[..idx])
        } else {
            msg
        };
        CoreError::Network(sanitized)
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Deserialization(e.to_string())
    }
}

impl From<csv::Error> for CoreError {
    fn from(e: csv::Error) -> Self {
        CoreError::ReferenceData(e.to_string())
    }
}

impl From<std::io::Error> for CoreError {
    fn from(e: std::io::Error) -> Self {
        CoreError::ReferenceData(e.to_string())
    }
}
