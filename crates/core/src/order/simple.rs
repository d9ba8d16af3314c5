//! Flat orderings by note attribute.

use std::cmp::Reverse;

use super::OrderingStrategy;
use crate::graph::{NoteGraph, NoteId};
use crate::resolve::ResolvedVault;

/// Case-insensitive title order.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlphabeticalOrder;

impl OrderingStrategy for AlphabeticalOrder {
    fn name(&self) -> &'static str {
        "alphabetical"
    }

    fn order(&self, graph: &NoteGraph, _resolved: &ResolvedVault) -> Vec<NoteId> {
        let mut notes: Vec<_> = graph.notes().collect();
        notes.sort_by_cached_key(|n| (n.title.to_lowercase(), n.relative_path.clone()));
        notes.into_iter().map(|n| n.id.clone()).collect()
    }
}

/// Most recently modified first.
#[derive(Debug, Clone, Copy, Default)]
pub struct ModifiedOrder;

impl OrderingStrategy for ModifiedOrder {
    fn name(&self) -> &'static str {
        "modified"
    }

    fn order(&self, graph: &NoteGraph, _resolved: &ResolvedVault) -> Vec<NoteId> {
        let mut notes: Vec<_> = graph.notes().collect();
        notes.sort_by(|a, b| {
            Reverse(a.modified)
                .cmp(&Reverse(b.modified))
                .then_with(|| a.relative_path.cmp(&b.relative_path))
        });
        notes.into_iter().map(|n| n.id.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{ids, vault};
    use super::*;

    #[test]
    fn alphabetical_by_title_then_path() {
        let (graph, resolved) = vault(&[
            ("b.md", "banana", 0, ""),
            ("a.md", "Cherry", 0, ""),
            ("z/dup.md", "apple", 0, ""),
            ("y/dup.md", "Apple", 0, ""),
        ]);
        let order = AlphabeticalOrder.order(&graph, &resolved);
        assert_eq!(ids(&order), vec!["y/dup", "z/dup", "b", "a"]);
    }

    #[test]
    fn modified_newest_first_then_path() {
        let (graph, resolved) = vault(&[
            ("old.md", "", 10, ""),
            ("new.md", "", 30, ""),
            ("b_same.md", "", 20, ""),
            ("a_same.md", "", 20, ""),
        ]);
        let order = ModifiedOrder.order(&graph, &resolved);
        assert_eq!(ids(&order), vec!["new", "a_same", "b_same", "old"]);
    }
}
