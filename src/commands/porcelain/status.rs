use crate::areas::repository::Repository;
use crate::artifacts::objects::object::Object;
use crate::artifacts::status::file_change::FileChangeType;
use crate::artifacts::status::status_info::StatusInfo;
use std::collections::BTreeSet;

impl Repository {
    /// Categorize every tracked and every working file.
    ///
    /// Tracked files compare their staged id with the id of the current file
    /// content; conflicted rows always count as modified.
    pub fn status(&self) -> anyhow::Result<StatusInfo> {
        let mut index = self.index();

        // Load the index file from the disk
        index.rehydrate()?;

        let workspace_files = self
            .workspace()
            .list_files(None)?
            .into_iter()
            .collect::<BTreeSet<_>>();
        let mut status = StatusInfo::default();

        for entry in index.entries() {
            let change = if !workspace_files.contains(&entry.path) {
                FileChangeType::Deleted
            } else {
                match entry.oid() {
                    None => FileChangeType::Modified,
                    Some(staged_oid) => {
                        let blob = self.workspace().parse_blob(&entry.path)?;
                        if blob.object_id()? == *staged_oid {
                            FileChangeType::Staged
                        } else {
                            FileChangeType::Modified
                        }
                    }
                }
            };

            status.record(entry.path.clone(), change);
        }

        for file in workspace_files {
            if index.entry_by_path(&file).is_none() {
                status.record(file, FileChangeType::Untracked);
            }
        }

        Ok(status)
    }
}
