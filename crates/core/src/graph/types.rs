//! Note graph data types.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::ops::Range;
use std::path::{Component, Path, PathBuf};
use std::time::SystemTime;

use serde::Serialize;

use crate::frontmatter::Frontmatter;

/// Identity of a note: its vault-relative path without extension, `/`-separated.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct NoteId(String);

impl NoteId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Build an id from a vault-relative note path (`Projects/Alpha.md` -> `Projects/Alpha`).
    pub fn from_relative_path(path: &Path) -> Self {
        Self(slash_path(&path.with_extension("")))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Last path segment, the name a wiki link usually uses.
    pub fn file_name(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }

    /// Folder segments leading to the note (empty for notes at the vault root).
    pub fn folders(&self) -> Vec<&str> {
        let mut segments: Vec<&str> = self.0.split('/').collect();
        segments.pop();
        segments
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Render a relative path with `/` separators regardless of platform.
pub fn slash_path(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Whether a reference is a plain link or an embed (`![[...]]`, `![...](...)`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReferenceKind {
    Link,
    Embed,
}

/// Textual syntax a reference was written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReferenceSyntax {
    /// `[[target#heading|alias]]`
    Wiki,
    /// `[text](target)`
    Markdown,
}

/// A reference token found in a note body, before resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawReference {
    /// Exact text of the token, e.g. `![[diagram.png|Overview]]`.
    pub original: String,
    pub kind: ReferenceKind,
    pub syntax: ReferenceSyntax,
    /// Target path or name as written, without heading fragment. Empty for `[[#Heading]]`.
    pub target: String,
    /// Heading or block fragment after `#`.
    pub heading: Option<String>,
    /// Wiki alias or markdown link text.
    pub label: Option<String>,
    /// Byte span of `original` within the note body.
    pub span: Range<usize>,
    /// 1-based line within the body.
    pub line_number: u32,
}

/// A markdown document of the vault.
#[derive(Debug, Clone)]
pub struct Note {
    pub id: NoteId,
    /// Vault-relative path including extension.
    pub relative_path: PathBuf,
    /// Title from frontmatter `title:`, else the file stem.
    pub title: String,
    pub frontmatter: Option<Frontmatter>,
    /// Note text with the frontmatter block removed.
    pub body: String,
    pub references: Vec<RawReference>,
    pub modified: SystemTime,
}

impl Note {
    /// `/`-separated relative path, as shown in section markers.
    pub fn display_path(&self) -> String {
        slash_path(&self.relative_path)
    }
}

/// A non-markdown file of the vault. Never inlined, only named.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Attachment {
    /// `/`-separated vault-relative path including extension.
    pub path: String,
}

impl Attachment {
    pub fn file_name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }
}

/// All notes and attachments of one vault, keyed for flat lookup.
#[derive(Debug, Clone)]
pub struct NoteGraph {
    root: PathBuf,
    notes: BTreeMap<NoteId, Note>,
    attachments: BTreeSet<Attachment>,
}

impl NoteGraph {
    pub fn new(root: PathBuf) -> Self {
        Self { root, notes: BTreeMap::new(), attachments: BTreeSet::new() }
    }

    /// Insert a note. Returns the note back if its id is already taken.
    pub fn insert_note(&mut self, note: Note) -> Result<(), Note> {
        if self.notes.contains_key(&note.id) {
            return Err(note);
        }
        self.notes.insert(note.id.clone(), note);
        Ok(())
    }

    pub fn insert_attachment(&mut self, attachment: Attachment) {
        self.attachments.insert(attachment);
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn note(&self, id: &NoteId) -> Option<&Note> {
        self.notes.get(id)
    }

    /// Notes in `NoteId` order.
    pub fn notes(&self) -> impl Iterator<Item = &Note> {
        self.notes.values()
    }

    pub fn note_ids(&self) -> impl Iterator<Item = &NoteId> {
        self.notes.keys()
    }

    /// Attachments in path order.
    pub fn attachments(&self) -> impl Iterator<Item = &Attachment> {
        self.attachments.iter()
    }

    pub fn note_count(&self) -> usize {
        self.notes.len()
    }

    pub fn attachment_count(&self) -> usize {
        self.attachments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}
