//! Note graph: notes, attachments, and the raw references between them.

pub mod builder;
pub mod code;
pub mod extractor;
pub mod types;

pub use builder::{BuildOutcome, GraphBuilder};
pub use extractor::{extract_references, extract_title};
pub use types::{
    Attachment, Note, NoteGraph, NoteId, RawReference, ReferenceKind, ReferenceSyntax,
    slash_path,
};
