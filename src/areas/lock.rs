//! Repository-wide advisory lock
//!
//! Mutating operations (add, rm, commit, merge, reset, checkout, branch and
//! tag creation) hold an exclusive lock on `<repo>/lock` for their whole
//! duration, so two writers never interleave their index and ref updates.
//! Readers do not take it.

use anyhow::Context;
use file_guard::{FileGuard, Lock};
use std::fs::File;
use std::path::Path;

pub const LOCK_FILE_NAME: &str = "lock";

/// Released when dropped.
pub struct RepositoryLock {
    _guard: FileGuard<Box<File>>,
}

impl RepositoryLock {
    /// Block until the exclusive lock on `<repo>/lock` is ours.
    pub fn acquire(repository_path: &Path) -> anyhow::Result<Self> {
        let lock_path = repository_path.join(LOCK_FILE_NAME);

        let lock_file = std::fs::OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)
            .with_context(|| format!("Unable to open lock file {}", lock_path.display()))?;

        let guard = file_guard::lock(Box::new(lock_file), Lock::Exclusive, 0, 1)
            .with_context(|| format!("Unable to lock {}", lock_path.display()))?;

        tracing::debug!(path = %lock_path.display(), "repository lock acquired");

        Ok(RepositoryLock { _guard: guard })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::TempDir;

    #[test]
    fn lock_can_be_taken_again_once_released() -> anyhow::Result<()> {
        let dir = TempDir::new()?;

        let first = RepositoryLock::acquire(dir.path())?;
        drop(first);
        let _second = RepositoryLock::acquire(dir.path())?;

        assert!(dir.path().join(LOCK_FILE_NAME).is_file());
        Ok(())
    }
}
