use std::sync::Arc;

use crate::models::reference::ReferenceEntry;

/// The symbol → company-name lookup table used by typeahead search.
///
/// Built once per session and never mutated afterwards; clones share the
/// same backing slice. Order is the source order and duplicates are kept.
#[derive(Debug, Clone, Default)]
pub struct ReferenceTable {
    entries: Arc<[ReferenceEntry]>,
}

impl ReferenceTable {
    pub fn new(entries: Vec<ReferenceEntry>) -> Self {
        Self {
            entries: entries.into(),
        }
    }

    /// A table with no rows. Matching against it yields nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn entries(&self) -> &[ReferenceEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ReferenceEntry> {
        self.entries.iter()
    }
}

impl From<Vec<ReferenceEntry>> for ReferenceTable {
    fn from(entries: Vec<ReferenceEntry>) -> Self {
        Self::new(entries)
    }
}

impl FromIterator<ReferenceEntry> for ReferenceTable {
    fn from_iter<I: IntoIterator<Item = ReferenceEntry>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
