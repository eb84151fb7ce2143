use crate::models::reference::ReferenceEntry;

/// Case-insensitive substring search over the reference table.
///
/// - An empty query matches nothing.
/// - An entry matches if its symbol *or* its name contains the query.
/// - Results keep table order and are not ranked or truncated.
///
/// Pure and cheap enough to call on every keystroke. An empty (not yet
/// loaded) table simply yields no matches.
#[must_use]
pub fn find_matches(query: &str, table: &[ReferenceEntry]) -> Vec<ReferenceEntry> {
    if query.is_empty() {
        return Vec::new();
    }
    let needle = query.to_lowercase();
    table
        .iter()
        .filter(|entry| {
            entry.symbol.to_lowercase().contains(&needle)
                || entry.name.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}
