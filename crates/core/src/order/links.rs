//! Reading order that follows the link graph.

use std::collections::HashSet;

use super::{HierarchicalOrder, OrderingStrategy};
use crate::graph::{NoteGraph, NoteId};
use crate::resolve::ResolvedVault;

/// Depth-first traversal of resolved note links.
///
/// Roots are taken in hierarchical order; from each root, linked notes follow
/// in first-mention order before the next root. A visited set makes cycles
/// and self links harmless.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinkOrder;

impl OrderingStrategy for LinkOrder {
    fn name(&self) -> &'static str {
        "links"
    }

    fn order(&self, graph: &NoteGraph, resolved: &ResolvedVault) -> Vec<NoteId> {
        let roots = HierarchicalOrder::default().order(graph, resolved);
        let mut visited: HashSet<NoteId> = HashSet::with_capacity(roots.len());
        let mut order = Vec::with_capacity(roots.len());
        let mut stack: Vec<NoteId> = Vec::new();

        for root in roots {
            stack.push(root);
            while let Some(id) = stack.pop() {
                if !visited.insert(id.clone()) {
                    continue;
                }
                if let Some(note) = resolved.note(&id) {
                    for next in note.linked_notes().into_iter().rev() {
                        if !visited.contains(next) {
                            stack.push(next.clone());
                        }
                    }
                }
                order.push(id);
            }
        }

        order
    }
}
