//! Three-way merge
//!
//! - `resolution`: per-path resolution of base/head/target trees
//! - `conflict`: marker rendering for paths that could not be resolved
//!
//! The merge base comes from `artifacts::log::commit_graph`.

use crate::artifacts::objects::object_id::ObjectId;
use std::path::PathBuf;

pub mod conflict;
pub mod resolution;

/// How a merge ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeOutcome {
    /// Target and HEAD are the same commit; nothing was written
    UpToDate,
    /// Conflict markers and index sentinels were written for these paths, no
    /// commit was created
    Conflicted(Vec<PathBuf>),
    /// A merge commit with parents `[head, target]` was created and HEAD moved
    Merged(ObjectId),
}
