//! References (branches, tags, HEAD)
//!
//! References are human-readable names pointing to commits:
//! - Branches: `refs/heads/*` pointing to branch tip commits
//! - Tags: `refs/tags/*` pointing to tagged commits
//! - HEAD: either symbolic (`ref: refs/heads/<branch>`) or detached (a
//!   literal commit id)
//!
//! ## File Format
//!
//! Every reference file holds a single line: a 40-character id for branches,
//! tags and a detached HEAD, or `ref: <path>` for a symbolic HEAD. All writes
//! replace the file atomically.

use crate::artifacts::branch::branch_name::{BranchName, SymRefName};
use crate::artifacts::branch::{HEAD_REF_NAME, REFS_PREFIX};
use crate::artifacts::core::atomic_file::write_atomically;
use crate::artifacts::core::error::RepositoryError;
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use derive_new::new;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Regex pattern for parsing symbolic references
const SYMREF_REGEX: &str = r"^ref: (.+)$";

/// Where HEAD points
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Head {
    /// Indirect: commits advance the named branch
    Symbolic(SymRefName),
    /// Direct: commits only move HEAD itself
    Detached(ObjectId),
}

impl Head {
    fn encode(&self) -> String {
        match self {
            Head::Symbolic(sym_ref_name) => format!("ref: {sym_ref_name}\n"),
            Head::Detached(oid) => format!("{oid}\n"),
        }
    }
}

#[derive(Debug, new)]
pub struct Refs {
    /// Path to the repository directory (typically `.mygit`)
    path: Box<Path>,
}

impl Refs {
    /// Read and classify HEAD.
    pub fn read_head(&self) -> anyhow::Result<Head> {
        let head_path = self.head_path();
        let content = std::fs::read_to_string(&head_path)
            .map_err(|_| RepositoryError::InvalidHead("HEAD not found".to_string()))?;
        let content = content.trim();

        let symref_regex = regex::Regex::new(SYMREF_REGEX)
            .with_context(|| format!("invalid symref regex: {SYMREF_REGEX}"))?;

        if let Some(captures) = symref_regex.captures(content) {
            return Ok(Head::Symbolic(SymRefName::new(captures[1].trim().to_string())));
        }

        if ObjectId::is_full_hex(content) {
            return Ok(Head::Detached(ObjectId::try_parse(content.to_string())?));
        }

        Err(RepositoryError::InvalidHead(content.to_string()).into())
    }

    /// Commit HEAD currently points at, or `None` on an unborn branch.
    pub fn read_head_oid(&self) -> anyhow::Result<Option<ObjectId>> {
        match self.read_head()? {
            Head::Detached(oid) => Ok(Some(oid)),
            Head::Symbolic(sym_ref_name) => {
                let ref_path = self.path.join(sym_ref_name.as_ref_path());
                if ref_path.is_file() {
                    self.read_ref_file(&ref_path).map(Some)
                } else {
                    Ok(None)
                }
            }
        }
    }

    /// Point HEAD somewhere else without touching any branch.
    pub fn set_head(&self, head: &Head) -> anyhow::Result<()> {
        write_atomically(&self.head_path(), head.encode().as_bytes())
            .context("failed to update HEAD")?;

        tracing::debug!(head = ?head, "HEAD updated");

        Ok(())
    }

    /// Move whatever HEAD designates to `oid`: the checked-out branch when HEAD
    /// is symbolic (creating it on an unborn branch), HEAD itself when detached.
    pub fn update_head(&self, oid: &ObjectId) -> anyhow::Result<()> {
        match self.read_head()? {
            Head::Symbolic(sym_ref_name) => self.write_ref(&sym_ref_name, oid),
            Head::Detached(_) => self.set_head(&Head::Detached(oid.clone())),
        }
    }

    /// Candidate files for a short reference name, in lookup order:
    /// `refs/heads/<name>`, `refs/tags/<name>`, then `<name>` itself when it
    /// already starts with `refs/`.
    pub fn candidate_paths(&self, name: &str) -> Vec<PathBuf> {
        let mut candidates = vec![
            self.heads_path().join(name),
            self.tags_path().join(name),
        ];

        if name.starts_with(REFS_PREFIX) {
            candidates.push(self.path.join(name));
        }

        candidates
    }

    /// Read the commit id stored in a reference file.
    pub fn read_ref_file(&self, path: &Path) -> anyhow::Result<ObjectId> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read ref file at {:?}", path))?;

        ObjectId::try_parse(content.trim().to_string())
            .with_context(|| format!("ref file at {:?} does not hold a commit id", path))
    }

    pub fn write_ref(&self, sym_ref_name: &SymRefName, oid: &ObjectId) -> anyhow::Result<()> {
        let ref_path = self.path.join(sym_ref_name.as_ref_path());

        write_atomically(&ref_path, format!("{oid}\n").as_bytes())
            .with_context(|| format!("failed to update {sym_ref_name}"))?;

        tracing::debug!(reference = %sym_ref_name, oid = %oid, "reference updated");

        Ok(())
    }

    pub fn branch_exists(&self, name: &BranchName) -> bool {
        self.path
            .join(SymRefName::for_branch(name).as_ref_path())
            .is_file()
    }

    pub fn create_branch(&self, name: &BranchName, source_oid: &ObjectId) -> anyhow::Result<()> {
        if self.branch_exists(name) {
            return Err(RepositoryError::BranchAlreadyExists(name.to_string()).into());
        }

        self.write_ref(&SymRefName::for_branch(name), source_oid)
    }

    pub fn create_tag(&self, name: &BranchName, target_oid: &ObjectId) -> anyhow::Result<()> {
        let sym_ref_name = SymRefName::for_tag(name);

        if self.path.join(sym_ref_name.as_ref_path()).is_file() {
            return Err(RepositoryError::TagAlreadyExists(name.to_string()).into());
        }

        self.write_ref(&sym_ref_name, target_oid)
    }

    /// Every branch then every tag, each group sorted by name.
    pub fn list_refs(&self) -> anyhow::Result<Vec<(ObjectId, SymRefName)>> {
        let mut refs = self.list_refs_under(&self.heads_path())?;
        refs.extend(self.list_refs_under(&self.tags_path())?);

        Ok(refs)
    }

    pub fn list_branches(&self) -> anyhow::Result<Vec<(ObjectId, SymRefName)>> {
        self.list_refs_under(&self.heads_path())
    }

    fn list_refs_under(&self, path: &Path) -> anyhow::Result<Vec<(ObjectId, SymRefName)>> {
        if !path.is_dir() {
            return Ok(Vec::new());
        }

        let mut refs = WalkDir::new(path)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .filter_map(|entry| {
                let relative_path = entry.path().strip_prefix(self.path.as_ref()).ok()?;
                let sym_ref_name = SymRefName::new(
                    crate::artifacts::index::to_slash_path(relative_path),
                );
                // unreadable or foreign files under refs/ are skipped
                let oid = self.read_ref_file(entry.path()).ok()?;
                Some((oid, sym_ref_name))
            })
            .collect::<Vec<_>>();
        refs.sort_by(|(_, left), (_, right)| left.cmp(right));

        Ok(refs)
    }

    pub fn head_path(&self) -> PathBuf {
        self.path.join(HEAD_REF_NAME)
    }

    pub fn refs_path(&self) -> PathBuf {
        self.path.join("refs")
    }

    pub fn heads_path(&self) -> PathBuf {
        self.refs_path().join("heads")
    }

    pub fn tags_path(&self) -> PathBuf {
        self.refs_path().join("tags")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::TempDir;
    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};

    #[fixture]
    fn refs() -> (TempDir, Refs) {
        let dir = TempDir::new().unwrap();
        let refs = Refs::new(dir.path().to_path_buf().into_boxed_path());
        std::fs::write(refs.head_path(), "ref: refs/heads/main\n").unwrap();
        (dir, refs)
    }

    fn oid(digit: char) -> ObjectId {
        ObjectId::try_parse(digit.to_string().repeat(40)).unwrap()
    }

    fn branch(name: &str) -> BranchName {
        BranchName::try_parse(name.to_string()).unwrap()
    }

    #[rstest]
    fn fresh_head_is_symbolic_and_unborn(refs: (TempDir, Refs)) -> anyhow::Result<()> {
        let (_dir, refs) = refs;

        assert_eq!(
            refs.read_head()?,
            Head::Symbolic(SymRefName::new("refs/heads/main".to_string()))
        );
        assert_eq!(refs.read_head_oid()?, None);
        Ok(())
    }

    #[rstest]
    fn updating_a_symbolic_head_moves_the_branch(refs: (TempDir, Refs)) -> anyhow::Result<()> {
        let (_dir, refs) = refs;

        refs.update_head(&oid('a'))?;

        assert_eq!(
            std::fs::read_to_string(refs.heads_path().join("main"))?,
            format!("{}\n", oid('a'))
        );
        assert_eq!(std::fs::read_to_string(refs.head_path())?, "ref: refs/heads/main\n");
        assert_eq!(refs.read_head_oid()?, Some(oid('a')));
        Ok(())
    }

    #[rstest]
    fn updating_a_detached_head_leaves_branches_alone(refs: (TempDir, Refs)) -> anyhow::Result<()> {
        let (_dir, refs) = refs;
        refs.update_head(&oid('a'))?;
        refs.set_head(&Head::Detached(oid('a')))?;

        refs.update_head(&oid('b'))?;

        assert_eq!(refs.read_head()?, Head::Detached(oid('b')));
        assert_eq!(refs.read_ref_file(&refs.heads_path().join("main"))?, oid('a'));
        Ok(())
    }

    #[rstest]
    #[case("not-a-commit-id")]
    #[case("abc123")]
    fn malformed_head_is_invalid(refs: (TempDir, Refs), #[case] content: &str) -> anyhow::Result<()> {
        let (_dir, refs) = refs;
        std::fs::write(refs.head_path(), content)?;

        let error = refs.read_head().unwrap_err();

        assert_eq!(
            error.downcast_ref::<RepositoryError>(),
            Some(&RepositoryError::InvalidHead(content.to_string()))
        );
        Ok(())
    }

    #[rstest]
    fn duplicate_branches_are_rejected(refs: (TempDir, Refs)) -> anyhow::Result<()> {
        let (_dir, refs) = refs;
        refs.create_branch(&branch("topic"), &oid('a'))?;

        let error = refs.create_branch(&branch("topic"), &oid('b')).unwrap_err();

        assert_eq!(
            error.downcast_ref::<RepositoryError>(),
            Some(&RepositoryError::BranchAlreadyExists("topic".to_string()))
        );
        assert_eq!(refs.read_ref_file(&refs.heads_path().join("topic"))?, oid('a'));
        Ok(())
    }

    #[rstest]
    fn list_refs_orders_branches_before_tags(refs: (TempDir, Refs)) -> anyhow::Result<()> {
        let (_dir, refs) = refs;
        refs.create_tag(&branch("v1"), &oid('c'))?;
        refs.create_branch(&branch("zeta"), &oid('b'))?;
        refs.create_branch(&branch("feature/x"), &oid('a'))?;

        let names = refs
            .list_refs()?
            .into_iter()
            .map(|(_, name)| name.to_string())
            .collect::<Vec<_>>();

        assert_eq!(
            names,
            vec!["refs/heads/feature/x", "refs/heads/zeta", "refs/tags/v1"]
        );
        Ok(())
    }

    #[rstest]
    fn candidate_paths_only_include_literal_refs_paths(refs: (TempDir, Refs)) {
        let (dir, refs) = refs;

        assert_eq!(refs.candidate_paths("main").len(), 2);
        assert_eq!(
            refs.candidate_paths("refs/heads/main").last(),
            Some(&dir.path().join("refs/heads/main"))
        );
    }
}
