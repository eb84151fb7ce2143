use serde::{Deserialize, Serialize};

/// The signed-in user, as handed over by the authentication layer.
///
/// Only the email is used: it keys every watchlist request to the
/// market-data service. The core never creates or validates identities.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub email: String,
}

impl Identity {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
        }
    }
}

// Keeps the email out of `{:?}` output in logs and panics.
impl std::fmt::Debug for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Identity")
            .field("email", &"<redacted>")
            .finish()
    }
}
