//! Frontmatter types and data structures.

use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use std::collections::BTreeMap;

/// Represents parsed YAML frontmatter from a markdown document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Frontmatter {
    /// Fields as key-value pairs, sorted by key.
    #[serde(flatten)]
    pub fields: BTreeMap<String, Value>,
}

impl Frontmatter {
    /// String value of a top-level field, if it is a string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }
}

/// Borrowed view of a document split at its frontmatter delimiters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitDocument<'a> {
    /// Text between the `---` delimiters, if the document has a frontmatter block.
    pub raw_frontmatter: Option<&'a str>,
    /// Everything after the closing delimiter line.
    pub body: &'a str,
}
