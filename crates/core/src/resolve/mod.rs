//! Reference resolution against a vault-wide file index.

pub mod anchor;
pub mod index;
pub mod resolver;

pub use anchor::{AnchorMap, slugify};
pub use index::{FileIndex, IndexEntry, Lookup, Target};
pub use resolver::{
    ResolutionStatus, ResolvedNote, ResolvedReference, ResolvedVault, Resolver, resolve_graph,
};
