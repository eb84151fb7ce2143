use serde::{Deserialize, Serialize};

/// One row of the bundled symbol reference dataset.
///
/// Either field may be an empty string when the source row was malformed;
/// the row is still kept so it stays matchable by the other field.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReferenceEntry {
    pub symbol: String,
    pub name: String,
}

impl ReferenceEntry {
    pub fn new(symbol: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            name: name.into(),
        }
    }
}
