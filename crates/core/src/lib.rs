//! Flatten a markdown notes vault into one self-contained document.
//!
//! The pipeline walks the vault ([`vault`]), builds a note graph ([`graph`]),
//! resolves cross-references ([`resolve`]), orders notes ([`order`]), and
//! assembles the output ([`assemble`]). [`merge::merge_vault`] runs all of it.

pub mod assemble;
pub mod config;
pub mod frontmatter;
pub mod graph;
pub mod merge;
pub mod order;
pub mod resolve;
pub mod vault;
pub mod warnings;

pub use merge::{MergeError, MergeOptions, MergeReport, MergeStats, merge_vault, merge_vault_with};
pub use warnings::MergeWarning;
