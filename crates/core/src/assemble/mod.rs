//! Assembly of the single merged document.

pub mod assembler;
pub mod instructions;

pub use assembler::{Assembler, MergedDocument, Section, SectionKind};
pub use instructions::render_instructions;

/// Layout switches for the merged document.
#[derive(Debug, Clone)]
pub struct AssemblyOptions {
    /// Caller text appended verbatim after the default guidance.
    pub additional_instructions: Option<String>,
    /// Close the document with a table of contents.
    pub table_of_contents: bool,
    /// Re-emit parsed frontmatter as a plain `Metadata:` list.
    pub include_metadata: bool,
}

impl Default for AssemblyOptions {
    fn default() -> Self {
        Self { additional_instructions: None, table_of_contents: true, include_metadata: false }
    }
}
