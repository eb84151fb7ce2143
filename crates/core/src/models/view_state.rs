use serde::{Deserialize, Serialize};

/// Loading/error flags shared by every watchlist operation.
///
/// There is exactly one of these per store, not one per operation. While
/// `loading` is true the presentation layer must disable add/delete controls;
/// nothing else prevents overlapping requests.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ViewState {
    pub loading: bool,
    /// Empty when no error has been reported.
    pub error: String,
}

impl ViewState {
    /// True when an error message is currently set.
    #[must_use]
    pub fn has_error(&self) -> bool {
        !self.error.is_empty()
    }

    /// True when add/delete controls may be enabled.
    #[must_use]
    pub fn can_mutate(&self) -> bool {
        !self.loading
    }
}
