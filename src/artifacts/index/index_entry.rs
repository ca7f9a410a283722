use crate::artifacts::database::database_entry::DatabaseEntry;
use crate::artifacts::index::CONFLICT_SENTINEL;
use crate::artifacts::index::entry_mode::EntryMode;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::tree::Tree;
use std::path::{Path, PathBuf};

/// What the index knows about a tracked path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryState {
    /// Staged content, ready to be written into a tree
    Resolved { mode: EntryMode, oid: ObjectId },
    /// Left behind by a merge whose sides disagreed; must be re-added
    Conflicted,
}

/// One row of the index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    pub path: PathBuf,
    pub state: EntryState,
}

impl IndexEntry {
    pub fn resolved(path: PathBuf, mode: EntryMode, oid: ObjectId) -> Self {
        IndexEntry {
            path,
            state: EntryState::Resolved { mode, oid },
        }
    }

    pub fn conflicted(path: PathBuf) -> Self {
        IndexEntry {
            path,
            state: EntryState::Conflicted,
        }
    }

    pub fn from_database_entry(path: PathBuf, entry: &DatabaseEntry) -> Self {
        Self::resolved(path, entry.mode, entry.oid.clone())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_conflicted(&self) -> bool {
        matches!(self.state, EntryState::Conflicted)
    }

    pub fn oid(&self) -> Option<&ObjectId> {
        match &self.state {
            EntryState::Resolved { oid, .. } => Some(oid),
            EntryState::Conflicted => None,
        }
    }

    pub fn database_entry(&self) -> Option<DatabaseEntry> {
        match &self.state {
            EntryState::Resolved { mode, oid } => Some(DatabaseEntry::new(oid.clone(), *mode)),
            EntryState::Conflicted => None,
        }
    }

    /// Encode as an index file line (without the trailing newline)
    pub fn encode(&self) -> String {
        match &self.state {
            EntryState::Resolved { mode, oid } => Tree::encode_line(mode, &self.path, oid),
            EntryState::Conflicted => format!(
                "{} {} {}",
                EntryMode::Regular,
                super::to_slash_path(&self.path),
                CONFLICT_SENTINEL
            ),
        }
    }

    /// Decode an index file line
    pub fn decode(line: &str) -> anyhow::Result<Self> {
        let (mode, path, id) = Tree::decode_line(line)?;

        if id == CONFLICT_SENTINEL {
            return Ok(Self::conflicted(path));
        }

        Ok(Self::resolved(path, mode, ObjectId::try_parse(id.to_string())?))
    }
}
