//! Merge ordering strategies.
//!
//! An [`OrderingStrategy`] turns the set of notes into the sequence in which
//! they appear in the merged document. Every strategy must return each note
//! exactly once and break ties by vault-relative path, so the result is a
//! strict total order that does not depend on discovery order.

pub mod hierarchical;
pub mod links;
pub mod simple;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::graph::{NoteGraph, NoteId};
use crate::resolve::ResolvedVault;

pub use hierarchical::HierarchicalOrder;
pub use links::LinkOrder;
pub use simple::{AlphabeticalOrder, ModifiedOrder};

/// A policy for ordering notes in the merged document.
pub trait OrderingStrategy {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Every note id of `graph`, each exactly once, in merge order.
    fn order(&self, graph: &NoteGraph, resolved: &ResolvedVault) -> Vec<NoteId>;
}

/// Built-in strategies selectable from config or the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderPolicy {
    /// Depth-first path order, like a table of contents.
    #[default]
    Hierarchical,
    /// Hierarchical, but each folder's subfolders come before its own notes.
    FoldersFirst,
    /// Flat order by title.
    Alphabetical,
    /// Most recently modified first.
    Modified,
    /// Follow links depth-first from each note in hierarchical order.
    Links,
}

impl OrderPolicy {
    pub const ALL: [OrderPolicy; 5] = [
        Self::Hierarchical,
        Self::FoldersFirst,
        Self::Alphabetical,
        Self::Modified,
        Self::Links,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hierarchical => "hierarchical",
            Self::FoldersFirst => "folders-first",
            Self::Alphabetical => "alphabetical",
            Self::Modified => "modified",
            Self::Links => "links",
        }
    }

    pub fn strategy(self) -> Box<dyn OrderingStrategy> {
        match self {
            Self::Hierarchical => Box::new(HierarchicalOrder::default()),
            Self::FoldersFirst => Box::new(HierarchicalOrder { folders_first: true }),
            Self::Alphabetical => Box::new(AlphabeticalOrder),
            Self::Modified => Box::new(ModifiedOrder),
            Self::Links => Box::new(LinkOrder),
        }
    }
}

impl fmt::Display for OrderPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown order '{s}'"))
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::vault;
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn every_strategy_is_total() {
        let (graph, resolved) = vault(&[
            ("Index.md", "Home", 5, "[[Projects/Alpha]] [[Zeta]]"),
            ("Projects/Alpha.md", "Alpha", 9, "[[Index]] [[Beta]]"),
            ("Projects/Beta.md", "Beta", 9, ""),
            ("Projects/Sub/Gamma.md", "alpha", 1, "[[Gamma]]"),
            ("Zeta.md", "Zeta", 3, "[[Missing]]"),
        ]);

        let all: BTreeSet<_> = graph.note_ids().cloned().collect();

        for policy in OrderPolicy::ALL {
            let order = policy.strategy().order(&graph, &resolved);
            assert_eq!(order.len(), all.len(), "{policy} repeated or dropped notes");
            let seen: BTreeSet<_> = order.iter().cloned().collect();
            assert_eq!(seen, all, "{policy} is not a permutation");

            let again = policy.strategy().order(&graph, &resolved);
            assert_eq!(order, again, "{policy} is not deterministic");
        }
    }

    #[test]
    fn policy_parses_from_str() {
        assert_eq!("links".parse::<OrderPolicy>(), Ok(OrderPolicy::Links));
        assert_eq!("Folders-First".parse::<OrderPolicy>(), Ok(OrderPolicy::FoldersFirst));
        assert!("random".parse::<OrderPolicy>().is_err());
    }

    #[test]
    fn policy_deserializes_kebab_case() {
        #[derive(Deserialize)]
        struct Wrapper {
            order: OrderPolicy,
        }
        let w: Wrapper = toml::from_str("order = \"folders-first\"").unwrap();
        assert_eq!(w.order, OrderPolicy::FoldersFirst);
    }
}
