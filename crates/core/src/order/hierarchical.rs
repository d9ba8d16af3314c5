//! Table-of-contents order over the vault's folder structure.

use std::cmp::Ordering;

use super::OrderingStrategy;
use crate::graph::{NoteGraph, NoteId};
use crate::resolve::ResolvedVault;

/// Depth-first, lexicographic walk of the folder tree.
///
/// By default a folder's own notes come before its subfolders, so a root
/// `Index` note leads the document. With `folders_first` the subfolders come
/// first at every level.
#[derive(Debug, Clone, Copy, Default)]
pub struct HierarchicalOrder {
    pub folders_first: bool,
}

impl HierarchicalOrder {
    fn compare(&self, a: &NoteId, b: &NoteId) -> Ordering {
        let a_parts: Vec<&str> = a.as_str().split('/').collect();
        let b_parts: Vec<&str> = b.as_str().split('/').collect();

        for (i, (x, y)) in a_parts.iter().zip(&b_parts).enumerate() {
            let x_is_folder = i + 1 < a_parts.len();
            let y_is_folder = i + 1 < b_parts.len();

            if x_is_folder != y_is_folder {
                // Folder first iff `folders_first`
                return if x_is_folder == self.folders_first {
                    Ordering::Less
                } else {
                    Ordering::Greater
                };
            }
            match x.cmp(y) {
                Ordering::Equal => continue,
                other => return other,
            }
        }

        a.cmp(b)
    }
}

impl OrderingStrategy for HierarchicalOrder {
    fn name(&self) -> &'static str {
        if self.folders_first { "folders-first" } else { "hierarchical" }
    }

    fn order(&self, graph: &NoteGraph, _resolved: &ResolvedVault) -> Vec<NoteId> {
        let mut ids: Vec<NoteId> = graph.note_ids().cloned().collect();
        ids.sort_by(|a, b| self.compare(a, b));
        ids
    }
}
