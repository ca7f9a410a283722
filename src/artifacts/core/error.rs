//! Repository error taxonomy
//!
//! Every operation returns `anyhow::Result`. The failures a caller may want to
//! branch on are raised as [`RepositoryError`] values and can be recovered with
//! `error.downcast_ref::<RepositoryError>()`.
//!
//! Merge conflicts are deliberately absent from the "abort" family: a
//! conflicted merge is a normal outcome (`MergeOutcome::Conflicted`), the
//! variant here only exists so the CLI can report it with its own exit code.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("not a mygit repository (or any parent up to {0})")]
    NotARepository(PathBuf),

    #[error("repository already initialized at {0}")]
    AlreadyInitialized(PathBuf),

    #[error("object {0} not found or corrupted")]
    ObjectNotFound(String),

    #[error("object {oid} is a {actual}, expected a {expected}")]
    UnexpectedObjectType {
        oid: String,
        expected: String,
        actual: String,
    },

    #[error("reference '{0}' not found")]
    ReferenceNotFound(String),

    #[error("invalid HEAD: {0}")]
    InvalidHead(String),

    #[error("invalid branch name: {0}")]
    InvalidBranchName(String),

    #[error("a branch named '{0}' already exists")]
    BranchAlreadyExists(String),

    #[error("a tag named '{0}' already exists")]
    TagAlreadyExists(String),

    #[error("nothing to commit (the index is empty)")]
    NothingToCommit,

    #[error("the index contains unresolved conflicts: {}", display_paths(.0))]
    UnresolvedConflicts(Vec<PathBuf>),

    #[error("path '{0}' is not in the index")]
    PathNotInIndex(PathBuf),

    #[error("refusing to merge unrelated histories")]
    UnrelatedHistories,

    #[error("merge produced conflicts in: {}", display_paths(.0))]
    MergeConflicts(Vec<PathBuf>),
}

impl RepositoryError {
    /// Process exit code reported by the CLI for this failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            RepositoryError::ObjectNotFound(_) | RepositoryError::UnexpectedObjectType { .. } => 2,
            RepositoryError::ReferenceNotFound(_) => 3,
            RepositoryError::InvalidHead(_) => 4,
            RepositoryError::BranchAlreadyExists(_) | RepositoryError::TagAlreadyExists(_) => 5,
            RepositoryError::NothingToCommit => 6,
            RepositoryError::UnrelatedHistories => 7,
            RepositoryError::MergeConflicts(_) | RepositoryError::UnresolvedConflicts(_) => 8,
            RepositoryError::NotARepository(_)
            | RepositoryError::AlreadyInitialized(_)
            | RepositoryError::InvalidBranchName(_)
            | RepositoryError::PathNotInIndex(_) => 1,
        }
    }
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|path| path.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
