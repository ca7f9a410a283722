//! Tree object
//!
//! A tree is the snapshot of every tracked path for one commit. Unlike a fully
//! hierarchical object model there are no nested subtrees: a single tree holds
//! the whole table with full relative paths (`src/lib.rs`, not `src` → `lib.rs`).
//!
//! ## Format
//!
//! On disk: `tree <size>\0<entries>`, where entries are newline-joined lines
//! `<mode> <path> <id>` sorted by path, without a trailing newline.
//!
//! Paths are not escaped, so the mode is taken from the first space and the id
//! from the last one; everything in between is the path.

use crate::artifacts::database::database_entry::DatabaseEntry;
use crate::artifacts::index::entry_mode::EntryMode;
use crate::artifacts::index::to_slash_path;
use crate::artifacts::objects::object::{Object, Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use bytes::Bytes;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tree {
    entries: BTreeMap<PathBuf, DatabaseEntry>,
}

impl Tree {
    pub fn new(entries: BTreeMap<PathBuf, DatabaseEntry>) -> Self {
        Tree { entries }
    }

    pub fn entries(&self) -> &BTreeMap<PathBuf, DatabaseEntry> {
        &self.entries
    }

    pub fn get(&self, path: &Path) -> Option<&DatabaseEntry> {
        self.entries.get(path)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Encode a single `<mode> <path> <id>` line.
    pub fn encode_line(mode: &EntryMode, path: &Path, oid: &ObjectId) -> String {
        format!("{} {} {}", mode, to_slash_path(path), oid)
    }

    /// Decode a single `<mode> <path> <id>` line.
    pub fn decode_line(line: &str) -> anyhow::Result<(EntryMode, PathBuf, &str)> {
        let (mode, rest) = line
            .split_once(' ')
            .with_context(|| format!("malformed entry line '{line}'"))?;
        let (path, id) = rest
            .rsplit_once(' ')
            .with_context(|| format!("malformed entry line '{line}'"))?;

        if path.is_empty() {
            anyhow::bail!("malformed entry line '{line}': empty path");
        }

        Ok((EntryMode::try_from(mode)?, PathBuf::from(path), id))
    }
}

impl Packable for Tree {
    fn payload(&self) -> anyhow::Result<Bytes> {
        let lines = self
            .entries
            .iter()
            .map(|(path, entry)| Self::encode_line(&entry.mode, path, &entry.oid))
            .collect::<Vec<_>>();

        Ok(Bytes::from(lines.join("\n")))
    }
}

impl Unpackable for Tree {
    fn deserialize(payload: &[u8]) -> anyhow::Result<Self> {
        let content = std::str::from_utf8(payload).context("tree payload is not UTF-8")?;

        // A repeated path keeps its last occurrence.
        let entries = content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| {
                let (mode, path, id) = Self::decode_line(line.trim_end_matches('\r'))?;
                let oid = ObjectId::try_parse(id.to_string())?;
                Ok((path, DatabaseEntry::new(oid, mode)))
            })
            .collect::<anyhow::Result<BTreeMap<_, _>>>()?;

        Ok(Tree { entries })
    }
}

impl Object for Tree {
    fn object_type(&self) -> ObjectType {
        ObjectType::Tree
    }
}
