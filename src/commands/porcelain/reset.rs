use crate::areas::repository::Repository;
use crate::artifacts::checkout::{ResetMode, WorkspaceFile};
use crate::artifacts::database::database_entry::DatabaseEntry;
use crate::artifacts::index::index_entry::IndexEntry;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::tree::Tree;
use std::path::PathBuf;

/// Everything a sync needs, loaded before HEAD, the index or any working
/// file changes
pub(crate) struct SyncPlan {
    commit_id: ObjectId,
    mode: ResetMode,
    tree: Tree,
    files: Vec<WorkspaceFile>,
}

impl Repository {
    /// Resolve `target` and sync the repository to it.
    pub fn reset(&self, target: &str, mode: ResetMode) -> anyhow::Result<ObjectId> {
        let _lock = self.lock()?;
        let commit_id = self.resolve(target)?;

        self.sync(&commit_id, mode)?;

        tracing::info!(commit = %commit_id, mode = %mode, "reset");

        Ok(commit_id)
    }

    /// Materialize `commit_id` at the given level:
    ///
    /// - soft: move whatever HEAD designates
    /// - mixed: also replace the index with the commit's tree
    /// - hard: also overwrite every working file the tree names
    ///
    /// Working files the tree does not name are never deleted. The caller is
    /// expected to hold the repository lock.
    pub(crate) fn sync(&self, commit_id: &ObjectId, mode: ResetMode) -> anyhow::Result<()> {
        let plan = self.plan_sync(commit_id, mode)?;
        self.apply_sync(plan)
    }

    /// Read the commit's tree and, for a hard sync, every blob it names.
    ///
    /// A missing object or a working path that cannot be written without
    /// removing something fails here, while the repository is untouched.
    pub(crate) fn plan_sync(&self, commit_id: &ObjectId, mode: ResetMode) -> anyhow::Result<SyncPlan> {
        let tree = self.database().load_commit_tree(commit_id)?;

        let files = if mode.updates_workspace() {
            self.load_workspace_files(tree.entries())?
        } else {
            Vec::new()
        };

        Ok(SyncPlan {
            commit_id: commit_id.clone(),
            mode,
            tree,
            files,
        })
    }

    pub(crate) fn apply_sync(&self, plan: SyncPlan) -> anyhow::Result<()> {
        self.refs().update_head(&plan.commit_id)?;

        if plan.mode.updates_index() {
            let mut index = self.index();
            index.rewrite(
                plan.tree
                    .entries()
                    .iter()
                    .map(|(path, entry)| IndexEntry::from_database_entry(path.clone(), entry)),
            );
            index.write_updates()?;
        }

        self.write_workspace_files(&plan.files)?;

        tracing::debug!(commit = %plan.commit_id, mode = %plan.mode, "repository synced");

        Ok(())
    }

    /// Blob contents for `entries`, each destination checked for writability
    pub(crate) fn load_workspace_files<'a>(
        &self,
        entries: impl IntoIterator<Item = (&'a PathBuf, &'a DatabaseEntry)>,
    ) -> anyhow::Result<Vec<WorkspaceFile>> {
        entries
            .into_iter()
            .map(|(path, entry)| {
                let blob = self.database().parse_object_as_blob(&entry.oid)?;
                self.workspace().ensure_writable(path)?;

                Ok(WorkspaceFile::new(path.clone(), blob.into_content(), entry.mode))
            })
            .collect()
    }

    pub(crate) fn write_workspace_files(&self, files: &[WorkspaceFile]) -> anyhow::Result<()> {
        for file in files {
            self.workspace()
                .write_file(&file.path, &file.content, file.mode)?;
        }

        Ok(())
    }
}
