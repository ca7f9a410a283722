//! Index file format
//!
//! The index (staging area) is a plain text file with one row per tracked
//! path:
//!
//! ```text
//! <mode> <path> <id-hex>
//! ```
//!
//! Fields are space delimited and paths are not escaped. A path left
//! conflicted by a merge carries the literal `CONFLICT` instead of an id.

use std::path::{Component, Path};

pub mod entry_mode;
pub mod index_entry;

/// Placeholder written in place of an object id for a conflicted row
pub const CONFLICT_SENTINEL: &str = "CONFLICT";

/// Render a workspace-relative path with `/` separators, as stored in trees
/// and the index.
pub fn to_slash_path(path: &Path) -> String {
    path.components()
        .filter_map(|component| match component {
            Component::Normal(name) => Some(name.to_string_lossy().to_string()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
