use crate::areas::repository::Repository;
use std::path::PathBuf;

impl Repository {
    /// Tracked paths in index order.
    pub fn ls_files(&self) -> anyhow::Result<Vec<PathBuf>> {
        let mut index = self.index();

        // Load the index file from the disk
        index.rehydrate()?;

        Ok(index.entries().map(|entry| entry.path.clone()).collect())
    }
}
