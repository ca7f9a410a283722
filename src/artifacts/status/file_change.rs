/// Where a path stands relative to the index
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FileChangeType {
    /// Tracked, and the working file matches the staged content
    Staged,
    /// Tracked, but the working file differs (or the row is conflicted)
    Modified,
    /// Tracked, but the working file is gone
    Deleted,
    /// Present in the working tree only
    Untracked,
}

impl FileChangeType {
    pub fn heading(&self) -> &'static str {
        match self {
            FileChangeType::Staged => "Staged files:",
            FileChangeType::Modified => "Modified files (not staged):",
            FileChangeType::Deleted => "Deleted files (in index, not in working tree):",
            FileChangeType::Untracked => "Untracked files:",
        }
    }
}
