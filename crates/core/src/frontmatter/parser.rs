//! Frontmatter parsing from markdown documents.

use super::types::{Frontmatter, SplitDocument};
use thiserror::Error;

/// Errors that can occur during frontmatter parsing.
#[derive(Debug, Error)]
pub enum FrontmatterParseError {
    #[error("invalid YAML frontmatter: {0}")]
    InvalidYaml(#[from] serde_yaml::Error),
}

const DELIMITER: &str = "---";

/// Split a document into its raw frontmatter block and body.
///
/// Frontmatter is delimited by `---` lines, the first of which must be the
/// document's first line:
/// ```markdown
/// ---
/// key: value
/// ---
/// # Document content
/// ```
/// A document whose opening delimiter is never closed has no frontmatter.
pub fn split(content: &str) -> SplitDocument<'_> {
    let no_frontmatter = SplitDocument { raw_frontmatter: None, body: content };

    let mut lines = content.split_inclusive('\n');

    let Some(first) = lines.next() else {
        return no_frontmatter;
    };
    if first.trim_end() != DELIMITER {
        return no_frontmatter;
    }

    let yaml_start = first.len();
    let mut offset = yaml_start;
    for line in lines {
        if line.trim_end() == DELIMITER {
            return SplitDocument {
                raw_frontmatter: Some(&content[yaml_start..offset]),
                body: &content[offset + line.len()..],
            };
        }
        offset += line.len();
    }

    no_frontmatter
}

/// Parse the YAML of a raw frontmatter block.
pub fn parse_fields(raw: &str) -> Result<Frontmatter, FrontmatterParseError> {
    if raw.trim().is_empty() {
        return Ok(Frontmatter::default());
    }
    Ok(serde_yaml::from_str(raw.trim())?)
}
