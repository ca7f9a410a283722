use crate::areas::repository::Repository;
use crate::artifacts::index::index_entry::IndexEntry;
use std::path::PathBuf;

impl Repository {
    /// Stage files. Directories are expanded recursively; paths are taken
    /// relative to the workspace root. Returns the staged paths.
    pub fn add(&self, paths: &[PathBuf]) -> anyhow::Result<Vec<PathBuf>> {
        let _lock = self.lock()?;
        let mut index = self.index();

        // Load the index file from the disk
        index.rehydrate()?;

        // Expand every argument before staging anything, so a bad path leaves
        // the index untouched
        let files = paths
            .iter()
            .map(|path| {
                let relative_path = self.workspace().relative_path(path)?;
                self.workspace().list_files(Some(&relative_path))
            })
            .collect::<anyhow::Result<Vec<_>>>()?
            .into_iter()
            .flatten()
            .collect::<Vec<_>>();

        for file in &files {
            let blob = self.workspace().parse_blob(file)?;
            let blob_id = self.database().store(&blob)?;
            let mode = self.workspace().file_mode(file);

            index.add(IndexEntry::resolved(file.clone(), mode, blob_id));
        }

        index.write_updates()?;

        tracing::info!(files = files.len(), "paths staged");

        Ok(files)
    }
}
