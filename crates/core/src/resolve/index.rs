//! Global file index used to resolve references by path or by name.

use std::collections::BTreeMap;

use crate::graph::{NoteGraph, NoteId};

/// What a reference can point at.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum Target {
    Note(NoteId),
    /// Vault-relative attachment path.
    Attachment(String),
}

/// A file known to the index, with its full vault-relative path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    pub path: String,
    pub target: Target,
}

/// Outcome of looking a key up in the index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup<'a> {
    Found(&'a IndexEntry),
    /// Several files match. Entries are sorted by path.
    Ambiguous(&'a [IndexEntry]),
    Missing,
}

/// Exact-case keys first, case-insensitive keys as fallback.
#[derive(Debug, Default)]
struct KeyTable {
    exact: BTreeMap<String, Vec<IndexEntry>>,
    folded: BTreeMap<String, Vec<IndexEntry>>,
}

impl KeyTable {
    fn insert(&mut self, key: &str, entry: &IndexEntry) {
        self.exact.entry(key.to_string()).or_default().push(entry.clone());
        self.folded.entry(key.to_lowercase()).or_default().push(entry.clone());
    }

    fn finish(&mut self) {
        for entries in self.exact.values_mut().chain(self.folded.values_mut()) {
            entries.sort_by(|a, b| a.path.cmp(&b.path));
            entries.dedup_by(|a, b| a.path == b.path);
        }
    }

    fn find(&self, key: &str) -> Option<&[IndexEntry]> {
        self.exact
            .get(key)
            .or_else(|| self.folded.get(&key.to_lowercase()))
            .map(Vec::as_slice)
    }
}

/// Flat lookup table over every note and attachment of a vault.
#[derive(Debug, Default)]
pub struct FileIndex {
    paths: KeyTable,
    names: KeyTable,
}

impl FileIndex {
    pub fn new(graph: &NoteGraph) -> Self {
        let mut index = Self::default();

        for note in graph.notes() {
            let path = note.display_path();
            let entry = IndexEntry { path: path.clone(), target: Target::Note(note.id.clone()) };

            index.paths.insert(note.id.as_str(), &entry);
            index.paths.insert(&path, &entry);

            let file_name = path.rsplit('/').next().unwrap_or(&path);
            index.names.insert(note.id.file_name(), &entry);
            index.names.insert(file_name, &entry);
        }

        for attachment in graph.attachments() {
            let entry = IndexEntry {
                path: attachment.path.clone(),
                target: Target::Attachment(attachment.path.clone()),
            };
            index.paths.insert(&attachment.path, &entry);
            index.names.insert(attachment.file_name(), &entry);
        }

        index.paths.finish();
        index.names.finish();
        index
    }

    /// Look up a normalised vault-relative path (with or without note extension).
    pub fn by_path(&self, path: &str) -> Lookup<'_> {
        to_lookup(self.paths.find(path))
    }

    /// Look up a bare file name (note stem, note file name, or attachment file name).
    pub fn by_name(&self, name: &str) -> Lookup<'_> {
        to_lookup(self.names.find(name))
    }
}

fn to_lookup(entries: Option<&[IndexEntry]>) -> Lookup<'_> {
    match entries {
        Some([single]) => Lookup::Found(single),
        Some(many) if !many.is_empty() => Lookup::Ambiguous(many),
        _ => Lookup::Missing,
    }
}
