//! Stable section anchors for notes in the merged document.

use std::collections::{BTreeMap, HashSet};

use crate::graph::NoteId;

const PREFIX: &str = "note-";

/// Anchor for every note, unique across the vault.
///
/// Anchors depend only on the set of note ids: collisions are numbered in id
/// order, so changing the merge order never changes an anchor.
#[derive(Debug, Clone, Default)]
pub struct AnchorMap {
    anchors: BTreeMap<NoteId, String>,
}

impl AnchorMap {
    pub fn new<'a>(ids: impl IntoIterator<Item = &'a NoteId>) -> Self {
        let mut sorted: Vec<&NoteId> = ids.into_iter().collect();
        sorted.sort();
        sorted.dedup();

        let mut taken = HashSet::new();
        let mut anchors = BTreeMap::new();

        for id in sorted {
            let base = format!("{PREFIX}{}", slugify(id.as_str()));
            let mut anchor = base.clone();
            let mut n = 2;
            while !taken.insert(anchor.clone()) {
                anchor = format!("{base}-{n}");
                n += 1;
            }
            anchors.insert(id.clone(), anchor);
        }

        Self { anchors }
    }

    pub fn get(&self, id: &NoteId) -> Option<&str> {
        self.anchors.get(id).map(String::as_str)
    }
}

/// Lowercase, keep alphanumerics, collapse everything else into single dashes.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_dash = false;

    for ch in text.chars() {
        if ch.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.extend(ch.to_lowercase());
        } else {
            pending_dash = true;
        }
    }

    if slug.is_empty() { "untitled".to_string() } else { slug }
}
