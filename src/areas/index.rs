//! Index (staging area)
//!
//! The index tracks which content will be included in the next commit. It is a
//! table keyed by path, so a path can never appear twice: staging a path again
//! replaces its previous row.
//!
//! ## Index File Format
//!
//! One row per tracked path, sorted by path:
//!
//! ```text
//! 100644 README.md 3b18e512dba79e4c8300dd08aeb37f8e728b8dad
//! 100755 scripts/run.sh 6f1a4e9c1d6f1a4e9c1d6f1a4e9c1d6f1a4e9c1d
//! 100644 src/lib.rs CONFLICT
//! ```
//!
//! The file is always replaced atomically.

use crate::artifacts::core::atomic_file::write_atomically;
use crate::artifacts::core::error::RepositoryError;
use crate::artifacts::index::index_entry::IndexEntry;
use crate::artifacts::objects::object::Packable;
use crate::artifacts::objects::tree::Tree;
use anyhow::Context;
use bytes::Bytes;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct Index {
    /// Path to the index file (typically `.mygit/index`)
    path: Box<Path>,
    /// Tracked rows keyed by path
    entries: BTreeMap<PathBuf, IndexEntry>,
}

impl Index {
    pub fn new(path: Box<Path>) -> Self {
        Index {
            path,
            entries: BTreeMap::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the index from disk
    ///
    /// A missing index file is an empty index. Rows naming the same path keep
    /// the last occurrence.
    pub fn rehydrate(&mut self) -> anyhow::Result<()> {
        self.entries.clear();

        if !self.path.exists() {
            return Ok(());
        }

        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Unable to read index file {}", self.path.display()))?;

        for (line_number, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }

            let entry = IndexEntry::decode(line).with_context(|| {
                format!(
                    "corrupt index file {} at line {}",
                    self.path.display(),
                    line_number + 1
                )
            })?;
            self.entries.insert(entry.path.clone(), entry);
        }

        Ok(())
    }

    /// Stage a row, replacing any previous row for the same path.
    pub fn add(&mut self, entry: IndexEntry) {
        self.entries.insert(entry.path.clone(), entry);
    }

    pub fn remove(&mut self, path: &Path) -> anyhow::Result<IndexEntry> {
        let removed = self
            .entries
            .remove(path)
            .ok_or_else(|| RepositoryError::PathNotInIndex(path.to_path_buf()))?;

        Ok(removed)
    }

    /// Replace the whole table.
    pub fn rewrite(&mut self, entries: impl IntoIterator<Item = IndexEntry>) {
        self.entries = entries
            .into_iter()
            .map(|entry| (entry.path.clone(), entry))
            .collect();
    }

    pub fn entry_by_path(&self, path: &Path) -> Option<&IndexEntry> {
        self.entries.get(path)
    }

    /// Rows in path order
    pub fn entries(&self) -> impl Iterator<Item = &IndexEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn conflicted_paths(&self) -> Vec<PathBuf> {
        self.entries()
            .filter(|entry| entry.is_conflicted())
            .map(|entry| entry.path.clone())
            .collect()
    }

    /// Build the tree snapshot of the staged rows.
    ///
    /// Refuses an empty index and an index that still holds conflicted rows.
    pub fn tree(&self) -> anyhow::Result<Tree> {
        if self.is_empty() {
            return Err(RepositoryError::NothingToCommit.into());
        }

        let conflicted = self.conflicted_paths();
        if !conflicted.is_empty() {
            return Err(RepositoryError::UnresolvedConflicts(conflicted).into());
        }

        Ok(Tree::new(
            self.entries
                .iter()
                .filter_map(|(path, entry)| Some((path.clone(), entry.database_entry()?)))
                .collect(),
        ))
    }

    /// The staged rows encoded as a tree payload.
    pub fn read_as_tree_payload(&self) -> anyhow::Result<Bytes> {
        self.tree()?.payload()
    }

    pub fn write_updates(&self) -> anyhow::Result<()> {
        let content = self
            .entries()
            .map(|entry| format!("{}\n", entry.encode()))
            .collect::<String>();

        write_atomically(&self.path, content.as_bytes())
            .with_context(|| format!("Unable to write index file {}", self.path.display()))?;

        tracing::debug!(rows = self.entries.len(), "index written");

        Ok(())
    }
}
