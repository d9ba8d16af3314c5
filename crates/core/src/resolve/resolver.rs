//! Reference resolution and rewriting.
//!
//! Each raw reference is looked up in the [`FileIndex`] and rewritten into text
//! that still makes sense once every note lives in a single document: note
//! links point at the target note's section anchor, attachments become short
//! placeholders, and anything that cannot be resolved is left untouched.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use tracing::warn;

use super::anchor::AnchorMap;
use super::index::{FileIndex, Lookup, Target};
use crate::graph::{Note, NoteGraph, NoteId, RawReference, ReferenceKind, ReferenceSyntax};
use crate::warnings::MergeWarning;

/// `![[image.png|300]]` and `|300x200` set a display size, not a caption.
static SIZE_ALIAS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+(x\d+)?$").unwrap());

/// How a reference was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolutionStatus {
    Resolved,
    /// Several candidates; the lexicographically first path was used.
    Ambiguous,
    /// No candidate; the original text is kept.
    Unresolved,
}

/// A reference together with its resolution and replacement text.
#[derive(Debug, Clone)]
pub struct ResolvedReference {
    pub raw: RawReference,
    pub status: ResolutionStatus,
    pub target: Option<Target>,
    /// Text that replaces `raw.original` in the merged output.
    pub rendered: String,
}

/// A note body with every reference rewritten.
#[derive(Debug, Clone)]
pub struct ResolvedNote {
    pub id: NoteId,
    pub body: String,
    pub references: Vec<ResolvedReference>,
}

impl ResolvedNote {
    /// Distinct notes this note links to or embeds, in first-mention order.
    pub fn linked_notes(&self) -> Vec<&NoteId> {
        let mut seen = BTreeSet::new();
        self.references
            .iter()
            .filter_map(|r| match &r.target {
                Some(Target::Note(id)) if seen.insert(id) => Some(id),
                _ => None,
            })
            .collect()
    }
}

/// Every note of the vault after resolution.
#[derive(Debug, Clone)]
pub struct ResolvedVault {
    pub notes: BTreeMap<NoteId, ResolvedNote>,
    pub anchors: AnchorMap,
    /// Notes referencing each attachment, keyed by attachment path.
    pub attachment_refs: BTreeMap<String, BTreeSet<NoteId>>,
    pub warnings: Vec<MergeWarning>,
}

impl ResolvedVault {
    pub fn note(&self, id: &NoteId) -> Option<&ResolvedNote> {
        self.notes.get(id)
    }

    /// Count references by status.
    pub fn count(&self, status: ResolutionStatus) -> usize {
        self.notes
            .values()
            .flat_map(|n| &n.references)
            .filter(|r| r.status == status)
            .count()
    }
}

/// Resolves references against a vault-wide index.
pub struct Resolver {
    index: FileIndex,
    anchors: AnchorMap,
}

impl Resolver {
    pub fn new(graph: &NoteGraph) -> Self {
        Self { index: FileIndex::new(graph), anchors: AnchorMap::new(graph.note_ids()) }
    }

    /// Resolve every note of the graph.
    pub fn resolve_all(self, graph: &NoteGraph) -> ResolvedVault {
        let mut notes = BTreeMap::new();
        let mut warnings = Vec::new();
        let mut attachment_refs: BTreeMap<String, BTreeSet<NoteId>> = BTreeMap::new();

        for note in graph.notes() {
            let resolved = self.resolve_note(note, &mut warnings);
            for reference in &resolved.references {
                if let Some(Target::Attachment(path)) = &reference.target {
                    attachment_refs.entry(path.clone()).or_default().insert(note.id.clone());
                }
            }
            notes.insert(note.id.clone(), resolved);
        }

        ResolvedVault { notes, anchors: self.anchors, attachment_refs, warnings }
    }

    /// Resolve and rewrite the references of a single note.
    pub fn resolve_note(&self, note: &Note, warnings: &mut Vec<MergeWarning>) -> ResolvedNote {
        let mut body = String::with_capacity(note.body.len());
        let mut references = Vec::with_capacity(note.references.len());
        let mut cursor = 0;

        for raw in &note.references {
            let (status, target, candidates) = self.lookup(note, raw);

            match status {
                ResolutionStatus::Unresolved => {
                    warn!(note = %note.id, line = raw.line_number, "unresolved reference {}", raw.original);
                    warnings.push(MergeWarning::UnresolvedReference {
                        source: note.id.clone(),
                        line: raw.line_number,
                        reference: raw.original.clone(),
                    });
                }
                ResolutionStatus::Ambiguous => {
                    let chosen = candidates.first().cloned().unwrap_or_default();
                    warn!(
                        note = %note.id,
                        line = raw.line_number,
                        "ambiguous reference {} resolved to {chosen}",
                        raw.original
                    );
                    warnings.push(MergeWarning::AmbiguousReference {
                        source: note.id.clone(),
                        line: raw.line_number,
                        reference: raw.original.clone(),
                        chosen,
                        candidates,
                    });
                }
                ResolutionStatus::Resolved => {}
            }

            let rendered = match &target {
                Some(target) => self.render(raw, target),
                None => raw.original.clone(),
            };

            body.push_str(&note.body[cursor..raw.span.start]);
            body.push_str(&rendered);
            cursor = raw.span.end;

            references.push(ResolvedReference { raw: raw.clone(), status, target, rendered });
        }
        body.push_str(&note.body[cursor..]);

        ResolvedNote { id: note.id.clone(), body, references }
    }

    /// Status, chosen target, and (for ambiguous matches) every candidate path.
    fn lookup(
        &self,
        note: &Note,
        raw: &RawReference,
    ) -> (ResolutionStatus, Option<Target>, Vec<String>) {
        if raw.target.is_empty() {
            return (ResolutionStatus::Resolved, Some(Target::Note(note.id.clone())), Vec::new());
        }
        match self.candidates(note, raw) {
            Lookup::Found(entry) => {
                (ResolutionStatus::Resolved, Some(entry.target.clone()), Vec::new())
            }
            Lookup::Ambiguous(entries) => (
                ResolutionStatus::Ambiguous,
                entries.first().map(|e| e.target.clone()),
                entries.iter().map(|e| e.path.clone()).collect(),
            ),
            Lookup::Missing => (ResolutionStatus::Unresolved, None, Vec::new()),
        }
    }

    /// Exact vault-relative path first, then file name across the whole vault.
    fn candidates(&self, note: &Note, raw: &RawReference) -> Lookup<'_> {
        let folders = note.id.folders();

        for path in candidate_paths(&folders, raw) {
            let found = self.index.by_path(&path);
            if found != Lookup::Missing {
                return found;
            }
        }

        let name = raw.target.trim_end_matches('/').rsplit('/').next().unwrap_or("");
        if name.is_empty() || name == "." || name == ".." {
            return Lookup::Missing;
        }
        self.index.by_name(name)
    }

    fn render(&self, raw: &RawReference, target: &Target) -> String {
        match target {
            Target::Note(id) => {
                let anchor = self.anchors.get(id).unwrap_or_default();
                let label = note_label(raw);
                match raw.kind {
                    ReferenceKind::Link => format!("[{label}](#{anchor})"),
                    ReferenceKind::Embed => format!("[Embedded note: {label}](#{anchor})"),
                }
            }
            Target::Attachment(path) => match caption(raw) {
                Some(caption) => format!("[Attachment: {path} ({caption})]"),
                None => format!("[Attachment: {path}]"),
            },
        }
    }
}

/// Paths to try, in order, for a reference written in `folders`.
///
/// Markdown links are relative to the note's folder first. Wiki links are
/// vault-relative unless they start with `./` or `../`.
fn candidate_paths(folders: &[&str], raw: &RawReference) -> Vec<String> {
    let target = raw.target.as_str();
    let explicit_relative = target.starts_with("./") || target.starts_with("../");
    let mut paths = Vec::new();

    if explicit_relative || raw.syntax == ReferenceSyntax::Markdown {
        if let Some(p) = normalize(folders, target) {
            paths.push(p);
        }
    }
    if !explicit_relative
        && let Some(p) = normalize(&[], target)
        && !paths.contains(&p)
    {
        paths.push(p);
    }
    paths
}

/// Join `target` onto `base` folders, resolving `.` and `..`. `None` if it escapes the vault.
fn normalize(base: &[&str], target: &str) -> Option<String> {
    let mut segments: Vec<&str> =
        if target.starts_with('/') { Vec::new() } else { base.to_vec() };

    for segment in target.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop()?;
            }
            s => segments.push(s),
        }
    }

    if segments.is_empty() { None } else { Some(segments.join("/")) }
}

fn note_label(raw: &RawReference) -> String {
    if let Some(label) = &raw.label {
        return label.clone();
    }
    let target = match raw.syntax {
        ReferenceSyntax::Wiki => raw.target.as_str(),
        ReferenceSyntax::Markdown => {
            let name = raw.target.rsplit('/').next().unwrap_or(&raw.target);
            name.strip_suffix(".md").unwrap_or(name)
        }
    };
    match (&raw.heading, target.is_empty()) {
        (Some(heading), true) => heading.clone(),
        (Some(heading), false) => format!("{target} > {heading}"),
        (None, _) => target.to_string(),
    }
}

fn caption(raw: &RawReference) -> Option<&str> {
    raw.label.as_deref().filter(|l| !SIZE_ALIAS_RE.is_match(l))
}

/// Convenience: build the resolver and resolve the whole graph.
pub fn resolve_graph(graph: &NoteGraph) -> ResolvedVault {
    Resolver::new(graph).resolve_all(graph)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Attachment, extract_references};
    use std::path::{Path, PathBuf};
    use std::time::UNIX_EPOCH;

    fn note(path: &str, body: &str) -> Note {
        Note {
            id: NoteId::from_relative_path(Path::new(path)),
            relative_path: PathBuf::from(path),
            title: String::new(),
            frontmatter: None,
            body: body.to_string(),
            references: extract_references(body),
            modified: UNIX_EPOCH,
        }
    }

    fn vault(notes: &[(&str, &str)], attachments: &[&str]) -> NoteGraph {
        let mut g = NoteGraph::new(PathBuf::from("/vault"));
        for (path, body) in notes {
            g.insert_note(note(path, body)).unwrap();
        }
        for a in attachments {
            g.insert_attachment(Attachment { path: a.to_string() });
        }
        g
    }

    fn body_of(resolved: &ResolvedVault, id: &str) -> String {
        resolved.note(&NoteId::new(id)).unwrap().body.clone()
    }

    #[test]
    fn exact_path_link_points_at_section_anchor() {
        let g = vault(
            &[("Index.md", "See [[Projects/Alpha]]."), ("Projects/Alpha.md", "")],
            &[],
        );
        let resolved = resolve_graph(&g);

        assert_eq!(body_of(&resolved, "Index"), "See [Projects/Alpha](#note-projects-alpha).");
        let r = &resolved.note(&NoteId::new("Index")).unwrap().references[0];
        assert_eq!(r.status, ResolutionStatus::Resolved);
        assert!(resolved.warnings.is_empty());
    }

    #[test]
    fn name_only_link_resolves_across_folders() {
        let g = vault(&[("Index.md", "[[Alpha|the alpha]]"), ("Projects/Alpha.md", "")], &[]);
        let resolved = resolve_graph(&g);
        assert_eq!(body_of(&resolved, "Index"), "[the alpha](#note-projects-alpha)");
    }

    #[test]
    fn ambiguous_name_picks_first_path_and_warns() {
        let g = vault(
            &[("Index.md", "[[X]]"), ("Zeta/X.md", ""), ("Alpha/Deep/X.md", "")],
            &[],
        );

        for _ in 0..3 {
            let resolved = resolve_graph(&g);
            assert_eq!(body_of(&resolved, "Index"), "[X](#note-alpha-deep-x)");
            assert_eq!(
                resolved.warnings,
                vec![MergeWarning::AmbiguousReference {
                    source: NoteId::new("Index"),
                    line: 1,
                    reference: "[[X]]".into(),
                    chosen: "Alpha/Deep/X.md".into(),
                    candidates: vec!["Alpha/Deep/X.md".into(), "Zeta/X.md".into()],
                }]
            );
        }
    }

    #[test]
    fn exact_path_beats_name_ambiguity() {
        let g = vault(&[("Index.md", "[[Zeta/X]]"), ("Zeta/X.md", ""), ("Alpha/X.md", "")], &[]);
        let resolved = resolve_graph(&g);

        assert_eq!(body_of(&resolved, "Index"), "[Zeta/X](#note-zeta-x)");
        assert!(resolved.warnings.is_empty());
    }

    #[test]
    fn unresolved_reference_is_kept_verbatim() {
        let g = vault(&[("Index.md", "Link to [[Missing]] here.")], &[]);
        let resolved = resolve_graph(&g);

        assert_eq!(body_of(&resolved, "Index"), "Link to [[Missing]] here.");
        assert_eq!(resolved.count(ResolutionStatus::Unresolved), 1);
        assert!(matches!(
            &resolved.warnings[0],
            MergeWarning::UnresolvedReference { reference, .. } if reference == "[[Missing]]"
        ));
    }

    #[test]
    fn embeds_become_placeholders() {
        let g = vault(
            &[("Projects/Alpha.md", "![[diagram.png]]\n![[diagram.png|300]]\n![Flow](diagram.png)")],
            &["Projects/diagram.png"],
        );
        let resolved = resolve_graph(&g);

        assert_eq!(
            body_of(&resolved, "Projects/Alpha"),
            "[Attachment: Projects/diagram.png]\n[Attachment: Projects/diagram.png]\n[Attachment: Projects/diagram.png (Flow)]"
        );
        let refs = &resolved.attachment_refs["Projects/diagram.png"];
        assert!(refs.contains(&NoteId::new("Projects/Alpha")));
    }

    #[test]
    fn note_embed_links_to_section() {
        let g = vault(&[("A.md", "![[B]]"), ("B.md", "content")], &[]);
        let resolved = resolve_graph(&g);
        assert_eq!(body_of(&resolved, "A"), "[Embedded note: B](#note-b)");
    }

    #[test]
    fn self_reference_and_cycles() {
        let g = vault(
            &[("A.md", "[[A]] and [[B]] and [[#Top]]"), ("B.md", "back to [[A]]")],
            &[],
        );
        let resolved = resolve_graph(&g);

        assert_eq!(body_of(&resolved, "A"), "[A](#note-a) and [B](#note-b) and [Top](#note-a)");
        assert_eq!(body_of(&resolved, "B"), "back to [A](#note-a)");
        let a = resolved.note(&NoteId::new("A")).unwrap();
        assert_eq!(a.linked_notes(), vec![&NoteId::new("A"), &NoteId::new("B")]);
    }

    #[test]
    fn heading_fragment_is_kept_in_label() {
        let g = vault(&[("A.md", "[[B#Setup]]"), ("B.md", "")], &[]);
        let resolved = resolve_graph(&g);
        assert_eq!(body_of(&resolved, "A"), "[B > Setup](#note-b)");
    }

    #[test]
    fn markdown_links_are_relative_to_the_note() {
        let g = vault(
            &[
                ("Projects/Alpha.md", "[beta](Beta.md) and [home](../Index.md)"),
                ("Projects/Beta.md", ""),
                ("Index.md", ""),
            ],
            &[],
        );
        let resolved = resolve_graph(&g);
        assert_eq!(
            body_of(&resolved, "Projects/Alpha"),
            "[beta](#note-projects-beta) and [home](#note-index)"
        );
    }

    #[test]
    fn escaping_the_vault_is_unresolved() {
        let g = vault(&[("Index.md", "[out](../../secret.md)")], &[]);
        let resolved = resolve_graph(&g);
        // Falls back to the file name, which does not exist either
        assert_eq!(body_of(&resolved, "Index"), "[out](../../secret.md)");
    }

    #[test]
    fn normalize_paths() {
        assert_eq!(normalize(&["a", "b"], "../c.md"), Some("a/c.md".into()));
        assert_eq!(normalize(&["a"], "./c"), Some("a/c".into()));
        assert_eq!(normalize(&["a"], "/top"), Some("top".into()));
        assert_eq!(normalize(&[], "../x"), None);
    }
}
