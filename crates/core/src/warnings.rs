//! Non-fatal conditions collected during a merge.

use std::fmt;

use serde::Serialize;

use crate::graph::NoteId;

/// Something the caller should know about that did not stop the merge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MergeWarning {
    /// A reference whose target is not in the vault. Kept as literal text.
    UnresolvedReference { source: NoteId, line: u32, reference: String },
    /// A reference matching several files by name. The first path was used.
    AmbiguousReference {
        source: NoteId,
        line: u32,
        reference: String,
        chosen: String,
        candidates: Vec<String>,
    },
    /// A note left out of the merge (unreadable, not UTF-8, duplicate id).
    SkippedNote { path: String, reason: String },
    /// A file or directory the walk could not visit.
    SkippedEntry { path: String, reason: String },
    /// Frontmatter that is not valid YAML. The block is still stripped.
    InvalidFrontmatter { note: NoteId, reason: String },
}

impl fmt::Display for MergeWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnresolvedReference { source, line, reference } => {
                write!(f, "{source}:{line}: unresolved reference {reference}")
            }
            Self::AmbiguousReference { source, line, reference, chosen, candidates } => {
                write!(
                    f,
                    "{source}:{line}: ambiguous reference {reference} matches {} files, using {chosen}",
                    candidates.len()
                )
            }
            Self::SkippedNote { path, reason } => write!(f, "{path}: skipped note: {reason}"),
            Self::SkippedEntry { path, reason } => write!(f, "{path}: not readable: {reason}"),
            Self::InvalidFrontmatter { note, reason } => {
                write!(f, "{note}: frontmatter ignored: {reason}")
            }
        }
    }
}
