//! The conversion pipeline: walk, resolve, order, assemble.

use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::assemble::{Assembler, AssemblyOptions, MergedDocument};
use crate::graph::GraphBuilder;
use crate::order::{OrderPolicy, OrderingStrategy};
use crate::resolve::{ResolutionStatus, resolve_graph};
use crate::vault::{VaultWalker, VaultWalkerError};
use crate::warnings::MergeWarning;

/// Failures that stop a merge. Everything else is a [`MergeWarning`].
#[derive(Debug, Error)]
pub enum MergeError {
    #[error("vault not found: {0}")]
    VaultNotFound(PathBuf),

    #[error("vault {0} contains no markdown notes")]
    VaultEmpty(PathBuf),

    #[error(transparent)]
    Walk(VaultWalkerError),
}

impl From<VaultWalkerError> for MergeError {
    fn from(e: VaultWalkerError) -> Self {
        match e {
            VaultWalkerError::MissingRoot(p) | VaultWalkerError::NotADirectory(p) => {
                Self::VaultNotFound(PathBuf::from(p))
            }
            other => Self::Walk(other),
        }
    }
}

/// Everything a merge run needs besides the vault root.
#[derive(Debug, Clone, Default)]
pub struct MergeOptions {
    /// Vault-relative folders to leave out, in addition to hidden ones.
    pub excluded_folders: Vec<PathBuf>,
    /// Where the merged document will be written. Never read back as a note.
    pub output: Option<PathBuf>,
    pub order: OrderPolicy,
    pub assembly: AssemblyOptions,
}

/// Counts describing one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MergeStats {
    pub notes: usize,
    pub attachments: usize,
    /// Attachments no note links to or embeds.
    pub unreferenced_attachments: usize,
    pub references: usize,
    pub resolved: usize,
    pub ambiguous: usize,
    pub unresolved: usize,
}

/// Result of a successful merge.
#[derive(Debug)]
pub struct MergeReport {
    pub document: MergedDocument,
    pub warnings: Vec<MergeWarning>,
    pub stats: MergeStats,
}

impl MergeReport {
    pub fn text(&self) -> String {
        self.document.render()
    }
}

/// Merge the vault at `root` using the strategy named in `options`.
pub fn merge_vault(root: &Path, options: &MergeOptions) -> Result<MergeReport, MergeError> {
    let strategy = options.order.strategy();
    merge_vault_with(root, options, strategy.as_ref())
}

/// Merge the vault at `root` with a caller-supplied ordering strategy.
pub fn merge_vault_with(
    root: &Path,
    options: &MergeOptions,
    strategy: &dyn OrderingStrategy,
) -> Result<MergeReport, MergeError> {
    let mut excluded = options.excluded_folders.clone();
    if let Some(output) = options.output.as_deref().and_then(canonical_output) {
        debug!(path = %output.display(), "excluding output file from walk");
        excluded.push(output);
    }

    let walker = VaultWalker::with_exclusions(root, excluded)?;
    let outcome = GraphBuilder::new(&walker).build()?;
    let graph = outcome.graph;
    let mut warnings = outcome.warnings;

    if graph.is_empty() {
        return Err(MergeError::VaultEmpty(walker.root().to_path_buf()));
    }

    let resolved = resolve_graph(&graph);
    warnings.extend(resolved.warnings.iter().cloned());

    let order = strategy.order(&graph, &resolved);
    debug!(strategy = strategy.name(), notes = order.len(), "ordered notes");

    let document = Assembler::new(&graph, &resolved, &options.assembly).assemble(&order);

    let stats = MergeStats {
        notes: graph.note_count(),
        attachments: graph.attachment_count(),
        unreferenced_attachments: graph
            .attachments()
            .filter(|a| !resolved.attachment_refs.contains_key(&a.path))
            .count(),
        references: resolved.notes.values().map(|n| n.references.len()).sum(),
        resolved: resolved.count(ResolutionStatus::Resolved),
        ambiguous: resolved.count(ResolutionStatus::Ambiguous),
        unresolved: resolved.count(ResolutionStatus::Unresolved),
    };

    info!(
        vault = %walker.root().display(),
        notes = stats.notes,
        attachments = stats.attachments,
        warnings = warnings.len(),
        "merged vault"
    );

    Ok(MergeReport { document, warnings, stats })
}

/// Absolute, symlink-free form of an output path that may not exist yet.
fn canonical_output(path: &Path) -> Option<PathBuf> {
    if let Ok(p) = path.canonicalize() {
        return Some(p);
    }
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    Some(parent.canonicalize().ok()?.join(path.file_name()?))
}
