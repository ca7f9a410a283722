//! Three-way tree resolution
//!
//! Trees are compared path by path on whole `(mode, id)` entries. For every
//! path present in any of base, head or target:
//!
//! | condition          | result                          |
//! |--------------------|---------------------------------|
//! | `head == target`   | head's entry (absent if both deleted) |
//! | `base == head`     | target's entry (absent deletes) |
//! | `base == target`   | head's entry                    |
//! | otherwise          | conflict                        |
//!
//! The rules are tried top to bottom and the first match wins.

use crate::artifacts::database::database_entry::DatabaseEntry;
use crate::artifacts::objects::tree::Tree;
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

/// Outcome for a single path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathResolution {
    /// The merged tree carries this entry, or drops the path when `None`
    Take(Option<DatabaseEntry>),
    /// Both sides changed the path in different ways
    Conflict,
}

pub fn resolve_path(
    base: Option<&DatabaseEntry>,
    head: Option<&DatabaseEntry>,
    target: Option<&DatabaseEntry>,
) -> PathResolution {
    if head == target {
        PathResolution::Take(head.cloned())
    } else if base == head {
        PathResolution::Take(target.cloned())
    } else if base == target {
        PathResolution::Take(head.cloned())
    } else {
        PathResolution::Conflict
    }
}

/// Result of merging three trees
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeMerge {
    /// Entries that resolved cleanly, keyed by path
    pub merged: BTreeMap<PathBuf, DatabaseEntry>,
    /// Paths that need a human, sorted
    pub conflicts: Vec<PathBuf>,
}

impl TreeMerge {
    pub fn is_clean(&self) -> bool {
        self.conflicts.is_empty()
    }

    pub fn into_tree(self) -> Tree {
        Tree::new(self.merged)
    }
}

pub fn merge_trees(base: &Tree, head: &Tree, target: &Tree) -> TreeMerge {
    let paths = base
        .entries()
        .keys()
        .chain(head.entries().keys())
        .chain(target.entries().keys())
        .collect::<BTreeSet<_>>();

    let mut tree_merge = TreeMerge::default();

    for path in paths {
        match resolve_path(base.get(path), head.get(path), target.get(path)) {
            PathResolution::Take(Some(entry)) => {
                tree_merge.merged.insert(path.clone(), entry);
            }
            PathResolution::Take(None) => {}
            PathResolution::Conflict => tree_merge.conflicts.push(path.clone()),
        }
    }

    tree_merge
}
