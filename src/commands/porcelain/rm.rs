use crate::areas::repository::Repository;
use std::path::Path;

impl Repository {
    /// Drop a path from the index; unless `cached`, delete the working file too.
    pub fn rm(&self, path: &Path, cached: bool) -> anyhow::Result<()> {
        let _lock = self.lock()?;
        let mut index = self.index();

        // Load the index file from the disk
        index.rehydrate()?;

        let relative_path = self.workspace().relative_path(path)?;
        index.remove(&relative_path)?;

        if !cached {
            self.workspace().remove_file(&relative_path)?;
        }

        index.write_updates()?;

        tracing::info!(path = %relative_path.display(), cached, "path removed from index");

        Ok(())
    }
}
