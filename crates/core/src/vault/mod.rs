//! Vault discovery.
//!
//! This module locates a vault on disk and walks it, classifying every file as
//! a note or an attachment.

pub mod locator;
pub mod walker;

pub use locator::{LocateError, locate_vault, vault_name};
pub use walker::{
    FileKind, SkippedEntry, VaultWalker, VaultWalkerError, WalkResult, WalkedFile,
    is_markdown_file,
};
