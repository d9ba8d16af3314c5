//! Frontmatter splitting and parsing.
//!
//! Notes may start with a YAML metadata block. The merge strips it from the
//! body and keeps the parsed fields for titles and optional metadata output.

pub mod parser;
pub mod types;

pub use parser::{FrontmatterParseError, parse_fields, split};
pub use types::{Frontmatter, SplitDocument};
