use crate::artifacts::status::file_change::FileChangeType;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub type ChangeSet = BTreeMap<PathBuf, FileChangeType>;

/// Every path the status inspection looked at, with its category
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusInfo {
    changes: ChangeSet,
}

impl StatusInfo {
    pub fn record(&mut self, path: PathBuf, change: FileChangeType) {
        self.changes.insert(path, change);
    }

    pub fn change(&self, path: &Path) -> Option<FileChangeType> {
        self.changes.get(path).copied()
    }

    /// Paths of one category, sorted
    pub fn paths(&self, change: FileChangeType) -> Vec<&Path> {
        self.changes
            .iter()
            .filter(|(_, recorded)| **recorded == change)
            .map(|(path, _)| path.as_path())
            .collect()
    }

    pub fn staged(&self) -> Vec<&Path> {
        self.paths(FileChangeType::Staged)
    }

    pub fn modified(&self) -> Vec<&Path> {
        self.paths(FileChangeType::Modified)
    }

    pub fn deleted(&self) -> Vec<&Path> {
        self.paths(FileChangeType::Deleted)
    }

    pub fn untracked(&self) -> Vec<&Path> {
        self.paths(FileChangeType::Untracked)
    }

    /// Nothing outside the staged category
    pub fn is_clean(&self) -> bool {
        self.changes
            .values()
            .all(|change| *change == FileChangeType::Staged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn categories_are_sorted_by_path() {
        let mut status = StatusInfo::default();
        status.record(PathBuf::from("z.txt"), FileChangeType::Untracked);
        status.record(PathBuf::from("b.txt"), FileChangeType::Staged);
        status.record(PathBuf::from("a.txt"), FileChangeType::Untracked);

        assert_eq!(status.untracked(), vec![Path::new("a.txt"), Path::new("z.txt")]);
        assert_eq!(status.staged(), vec![Path::new("b.txt")]);
        assert!(status.deleted().is_empty());
        assert!(!status.is_clean());
    }
}
