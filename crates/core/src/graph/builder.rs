//! Build the in-memory note graph from a vault walk.

use std::fs;

use tracing::{debug, warn};

use super::extractor::{extract_references, extract_title};
use super::types::{Attachment, Note, NoteGraph, NoteId, slash_path};
use crate::frontmatter;
use crate::vault::{VaultWalker, VaultWalkerError, WalkedFile};
use crate::warnings::MergeWarning;

/// Result of building a graph: the graph plus per-file warnings.
#[derive(Debug)]
pub struct BuildOutcome {
    pub graph: NoteGraph,
    pub warnings: Vec<MergeWarning>,
}

/// Walks a vault and turns each discovered file into a graph node.
pub struct GraphBuilder<'a> {
    walker: &'a VaultWalker,
}

impl<'a> GraphBuilder<'a> {
    pub fn new(walker: &'a VaultWalker) -> Self {
        Self { walker }
    }

    /// Walk the vault and read every note.
    ///
    /// Notes that cannot be read are skipped with a warning. The returned graph
    /// may be empty; deciding whether that is fatal is up to the caller.
    pub fn build(&self) -> Result<BuildOutcome, VaultWalkerError> {
        let walk = self.walker.walk()?;
        let mut graph = NoteGraph::new(self.walker.root().to_path_buf());
        let mut warnings = Vec::new();

        for skipped in &walk.skipped {
            warn!(path = %skipped.path.display(), "skipping unreadable entry: {}", skipped.reason);
            warnings.push(MergeWarning::SkippedEntry {
                path: slash_path(&skipped.path),
                reason: skipped.reason.clone(),
            });
        }

        for file in walk.attachments() {
            graph.insert_attachment(Attachment { path: slash_path(&file.relative_path) });
        }

        for file in walk.notes() {
            match read_note(file, &mut warnings) {
                Ok(note) => {
                    debug!(
                        note = %note.id,
                        references = note.references.len(),
                        "read note"
                    );
                    if let Err(dup) = graph.insert_note(note) {
                        let reason = format!("another note already has id '{}'", dup.id);
                        warn!(path = %dup.display_path(), "{reason}");
                        warnings.push(MergeWarning::SkippedNote {
                            path: dup.display_path(),
                            reason,
                        });
                    }
                }
                Err(reason) => {
                    let path = slash_path(&file.relative_path);
                    warn!(path = %path, "skipping note: {reason}");
                    warnings.push(MergeWarning::SkippedNote { path, reason });
                }
            }
        }

        debug!(
            notes = graph.note_count(),
            attachments = graph.attachment_count(),
            "note graph built"
        );

        Ok(BuildOutcome { graph, warnings })
    }
}

fn read_note(file: &WalkedFile, warnings: &mut Vec<MergeWarning>) -> Result<Note, String> {
    let bytes = fs::read(&file.absolute_path).map_err(|e| e.to_string())?;
    let content = String::from_utf8(bytes).map_err(|_| "not valid UTF-8".to_string())?;
    // A UTF-8 byte order mark would hide the frontmatter delimiter
    let content = content.strip_prefix('\u{feff}').unwrap_or(&content);

    let id = NoteId::from_relative_path(&file.relative_path);
    let split = frontmatter::split(content);

    let frontmatter = match split.raw_frontmatter.map(frontmatter::parse_fields) {
        Some(Ok(fm)) => Some(fm),
        Some(Err(e)) => {
            warn!(note = %id, "invalid frontmatter: {e}");
            warnings.push(MergeWarning::InvalidFrontmatter {
                note: id.clone(),
                reason: e.to_string(),
            });
            None
        }
        None => None,
    };

    let body = split.body.to_string();
    let title = extract_title(frontmatter.as_ref(), &file.relative_path);
    let references = extract_references(&body);

    Ok(Note {
        id,
        relative_path: file.relative_path.clone(),
        title,
        frontmatter,
        body,
        references,
        modified: file.modified,
    })
}
