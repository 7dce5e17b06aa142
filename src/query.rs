//! Item lookup by name
//!
//! Matching is a case-insensitive substring search over the item catalog.
//! Items whose metadata has no `name` never match.

use crate::error::{MarketError, Result};
use crate::store::{ItemId, Store};

/// An item whose name matched the query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate<'a> {
    pub item_id: ItemId,
    pub name: &'a str,
}

/// All items whose name contains `query`, ignoring case, in catalog order
pub fn candidates<'a>(store: &'a Store, query: &str) -> Vec<Candidate<'a>> {
    let needle = query.to_lowercase();

    store
        .items()
        .iter()
        .filter_map(|(item_id, item)| match item.name() {
            Some(name) => Some(Candidate {
                item_id: *item_id,
                name,
            }),
            None => {
                log::warn!(
                    "Item {} has no name, skipping: {}",
                    item_id,
                    item.metadata()
                );
                None
            }
        })
        .filter(|candidate| candidate.name.to_lowercase().contains(&needle))
        .collect()
}

/// Pick the `selection`-th candidate (1-based)
pub fn select(candidates: &[Candidate<'_>], selection: i64) -> Result<ItemId> {
    usize::try_from(selection)
        .ok()
        .and_then(|s| s.checked_sub(1))
        .and_then(|index| candidates.get(index))
        .map(|candidate| candidate.item_id)
        .ok_or(MarketError::InvalidSelection {
            selection,
            candidates: candidates.len(),
        })
}

/// Resolve `query` to exactly one item.
///
/// A single match is returned directly. With several matches `choose` is
/// asked for a 1-based selection among them.
pub fn resolve<F>(store: &Store, query: &str, choose: F) -> Result<ItemId>
where
    F: FnOnce(&[Candidate<'_>]) -> Result<i64>,
{
    let matches = candidates(store, query);

    match matches.as_slice() {
        [] => Err(MarketError::NotFound(query.to_string())),
        [only] => Ok(only.item_id),
        many => {
            let selection = choose(many)?;
            select(many, selection)
        }
    }
}

/// Numbered candidate list shown to the user, one per line
pub fn format_candidates(candidates: &[Candidate<'_>]) -> String {
    candidates
        .iter()
        .enumerate()
        .map(|(i, c)| format!("{}. {}\n", i + 1, c.name))
        .collect()
}
