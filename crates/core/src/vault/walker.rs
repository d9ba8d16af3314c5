//! Recursive vault directory walker.

use std::path::{Path, PathBuf};
use std::time::SystemTime;
use thiserror::Error;
use walkdir::WalkDir;

/// Directory names that never belong to the note graph.
const EXCLUDED_NAMES: &[&str] = &["node_modules", "target", "__pycache__", "venv"];

/// Extensions (lowercase) treated as notes. Everything else is an attachment.
const NOTE_EXTENSIONS: &[&str] = &["md", "markdown"];

#[derive(Debug, Error)]
pub enum VaultWalkerError {
    #[error("vault root does not exist: {0}")]
    MissingRoot(String),

    #[error("vault root is not a directory: {0}")]
    NotADirectory(String),

    #[error("failed to walk vault directory {0}: {1}")]
    WalkError(String, #[source] walkdir::Error),
}

/// How a discovered file participates in the merge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Note,
    Attachment,
}

/// Information about a discovered file.
#[derive(Debug, Clone)]
pub struct WalkedFile {
    /// Absolute path to the file.
    pub absolute_path: PathBuf,
    /// Path relative to vault root.
    pub relative_path: PathBuf,
    /// File modification time.
    pub modified: SystemTime,
    /// Note or attachment, decided by extension.
    pub kind: FileKind,
}

/// An entry below the root that could not be visited.
#[derive(Debug, Clone)]
pub struct SkippedEntry {
    pub path: PathBuf,
    pub reason: String,
}

/// Result of a walk: every reachable file plus the entries that failed.
#[derive(Debug, Default)]
pub struct WalkResult {
    pub files: Vec<WalkedFile>,
    pub skipped: Vec<SkippedEntry>,
}

impl WalkResult {
    pub fn notes(&self) -> impl Iterator<Item = &WalkedFile> {
        self.files.iter().filter(|f| f.kind == FileKind::Note)
    }

    pub fn attachments(&self) -> impl Iterator<Item = &WalkedFile> {
        self.files.iter().filter(|f| f.kind == FileKind::Attachment)
    }
}

/// Walker for discovering notes and attachments in a vault.
#[derive(Debug)]
pub struct VaultWalker {
    root: PathBuf,
    /// Folders to exclude from walking (relative paths from vault root).
    excluded_folders: Vec<PathBuf>,
}

impl VaultWalker {
    /// Create a new walker for the given vault root.
    #[cfg(test)]
    pub fn new(root: &Path) -> Result<Self, VaultWalkerError> {
        Self::with_exclusions(root, Vec::new())
    }

    /// Create a new walker with folder exclusions.
    ///
    /// Excluded folders can be specified as:
    /// - Relative paths from vault root (e.g., "automations/templates")
    /// - Absolute paths (will be converted to relative)
    pub fn with_exclusions(
        root: &Path,
        excluded_folders: Vec<PathBuf>,
    ) -> Result<Self, VaultWalkerError> {
        let root = root
            .canonicalize()
            .map_err(|_| VaultWalkerError::MissingRoot(root.display().to_string()))?;

        if !root.is_dir() {
            return Err(VaultWalkerError::NotADirectory(root.display().to_string()));
        }

        let excluded_folders = excluded_folders
            .into_iter()
            .map(|p| {
                if p.is_absolute() {
                    p.strip_prefix(&root).unwrap_or(&p).to_path_buf()
                } else {
                    p
                }
            })
            .collect();

        Ok(Self { root, excluded_folders })
    }

    /// Walk the vault and return every note and attachment, sorted by relative path.
    ///
    /// Entries are visited in file-name order at every level. Failures below the
    /// root are collected in [`WalkResult::skipped`]; only a failure to read the
    /// root itself is an error.
    pub fn walk(&self) -> Result<WalkResult, VaultWalkerError> {
        let mut result = WalkResult::default();

        for entry in WalkDir::new(&self.root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| !self.is_excluded(e))
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if e.depth() == 0 => {
                    return Err(VaultWalkerError::WalkError(
                        self.root.display().to_string(),
                        e,
                    ));
                }
                Err(e) => {
                    let path = e.path().map(Path::to_path_buf).unwrap_or_default();
                    result.skipped.push(SkippedEntry {
                        path: self.relative(&path),
                        reason: e.to_string(),
                    });
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            let metadata = match entry.metadata() {
                Ok(m) => m,
                Err(e) => {
                    result.skipped.push(SkippedEntry {
                        path: self.relative(path),
                        reason: e.to_string(),
                    });
                    continue;
                }
            };

            let kind =
                if is_markdown_file(path) { FileKind::Note } else { FileKind::Attachment };

            result.files.push(WalkedFile {
                absolute_path: path.to_path_buf(),
                relative_path: self.relative(path),
                modified: metadata.modified().unwrap_or(std::time::UNIX_EPOCH),
                kind,
            });
        }

        result.files.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
        Ok(result)
    }

    /// Check if an entry should be excluded from walking.
    fn is_excluded(&self, entry: &walkdir::DirEntry) -> bool {
        // Never filter the root directory (depth 0)
        if entry.depth() == 0 {
            return false;
        }

        let name = entry.file_name().to_string_lossy();

        // Hidden entries: .obsidian, .git, .trash, ...
        if name.starts_with('.') {
            return true;
        }

        if entry.file_type().is_dir() && EXCLUDED_NAMES.contains(&name.as_ref()) {
            return true;
        }

        if !self.excluded_folders.is_empty()
            && let Ok(relative) = entry.path().strip_prefix(&self.root)
        {
            for excluded in &self.excluded_folders {
                if relative.starts_with(excluded) {
                    return true;
                }
            }
        }

        false
    }

    fn relative(&self, path: &Path) -> PathBuf {
        path.strip_prefix(&self.root).unwrap_or(path).to_path_buf()
    }

    /// Get the vault root path.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

/// Whether a path names a note (case-insensitive `.md` / `.markdown`).
pub fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| NOTE_EXTENSIONS.iter().any(|n| e.eq_ignore_ascii_case(n)))
}
