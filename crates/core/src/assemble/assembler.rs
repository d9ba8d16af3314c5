//! Concatenate instructions, note sections, and the table of contents.

use serde_yaml::Value;

use super::AssemblyOptions;
use super::instructions::render_instructions;
use crate::frontmatter::Frontmatter;
use crate::graph::{Note, NoteGraph, NoteId};
use crate::resolve::{ResolvedNote, ResolvedVault};

const TOC_BEGIN: &str = "BEGIN TABLE OF CONTENTS";
const TOC_END: &str = "END TABLE OF CONTENTS";

/// What a section of the merged document holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionKind {
    Instructions,
    Note(NoteId),
    TableOfContents,
}

/// One block of the merged document. Text always ends with a newline.
#[derive(Debug, Clone)]
pub struct Section {
    pub kind: SectionKind,
    pub text: String,
}

/// The single output artifact.
#[derive(Debug, Clone)]
pub struct MergedDocument {
    pub sections: Vec<Section>,
}

impl MergedDocument {
    /// Full document text; sections are separated by a blank line.
    pub fn render(&self) -> String {
        self.sections.iter().map(|s| s.text.as_str()).collect::<Vec<_>>().join("\n")
    }

    /// Notes in document order.
    pub fn note_ids(&self) -> impl Iterator<Item = &NoteId> {
        self.sections.iter().filter_map(|s| match &s.kind {
            SectionKind::Note(id) => Some(id),
            _ => None,
        })
    }
}

/// Builds a [`MergedDocument`] from resolved notes in a given order.
pub struct Assembler<'a> {
    graph: &'a NoteGraph,
    resolved: &'a ResolvedVault,
    options: &'a AssemblyOptions,
}

impl<'a> Assembler<'a> {
    pub fn new(
        graph: &'a NoteGraph,
        resolved: &'a ResolvedVault,
        options: &'a AssemblyOptions,
    ) -> Self {
        Self { graph, resolved, options }
    }

    /// Assemble the document. Ids missing from the graph are ignored.
    pub fn assemble(&self, order: &[NoteId]) -> MergedDocument {
        let mut sections = vec![Section {
            kind: SectionKind::Instructions,
            text: render_instructions(self.options),
        }];

        let mut included = Vec::with_capacity(order.len());
        for id in order {
            let (Some(note), Some(resolved)) = (self.graph.note(id), self.resolved.note(id))
            else {
                continue;
            };
            sections.push(Section {
                kind: SectionKind::Note(id.clone()),
                text: self.note_section(note, resolved),
            });
            included.push(id);
        }

        if self.options.table_of_contents {
            sections.push(Section {
                kind: SectionKind::TableOfContents,
                text: self.table_of_contents(&included),
            });
        }

        MergedDocument { sections }
    }

    fn anchor(&self, id: &NoteId) -> &str {
        self.resolved.anchors.get(id).unwrap_or_default()
    }

    fn note_section(&self, note: &Note, resolved: &ResolvedNote) -> String {
        let path = note.display_path();
        let mut text = String::new();

        text.push_str(&format!("<a id=\"{}\"></a>\n", self.anchor(&note.id)));
        text.push_str(&format!("## {}\n\n", heading(note)));
        text.push_str(&format!("BEGIN SOURCE: {path}\n\n"));

        if self.options.include_metadata
            && let Some(fm) = &note.frontmatter
            && !fm.fields.is_empty()
        {
            text.push_str(&render_metadata(fm));
            text.push('\n');
        }

        let body = resolved.body.replace("\r\n", "\n");
        let body = trim_blank_lines(&body);
        if !body.is_empty() {
            text.push_str(body);
            text.push_str("\n\n");
        }

        text.push_str(&format!("END SOURCE: {path}\n"));
        text
    }

    fn table_of_contents(&self, ids: &[&NoteId]) -> String {
        let mut text = format!("{TOC_BEGIN}\n\n");
        for id in ids {
            text.push_str(&format!("- [{id}](#{})\n", self.anchor(id)));
        }
        text.push_str(&format!("\n{TOC_END}\n"));
        text
    }
}

/// `## Projects/Alpha`, or `## Title (Projects/Alpha)` when the title differs from the file name.
fn heading(note: &Note) -> String {
    if note.title == note.id.file_name() {
        note.id.to_string()
    } else {
        format!("{} ({})", note.title, note.id)
    }
}

fn render_metadata(fm: &Frontmatter) -> String {
    let mut text = String::from("Metadata:\n");
    for (key, value) in &fm.fields {
        text.push_str(&format!("- {key}: {}\n", render_value(value)));
    }
    text
}

fn render_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Sequence(items) => {
            items.iter().map(render_value).collect::<Vec<_>>().join(", ")
        }
        other => serde_json::to_string(other).unwrap_or_default(),
    }
}

/// Drop leading blank lines and trailing whitespace.
fn trim_blank_lines(body: &str) -> &str {
    let body = body.trim_end();
    let mut start = 0;
    for line in body.split_inclusive('\n') {
        if !line.trim().is_empty() {
            break;
        }
        start += line.len();
    }
    &body[start..]
}
