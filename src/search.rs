#[cfg(test)]
#[path = "search_test.rs"]
mod search_test;

use crate::entity::Entity;

/// Entities whose id contains `query` (case-insensitive), in input order, at
/// most `limit` of them. A blank query matches nothing.
#[must_use]
pub fn search<'a>(entities: &'a [Entity], query: &str, limit: usize) -> Vec<&'a Entity> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }
    entities
        .iter()
        .filter(|e| e.id.to_lowercase().contains(&needle))
        .take(limit)
        .collect()
}
