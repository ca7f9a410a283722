use crate::areas::repository::Repository;
use crate::artifacts::branch::HEAD_REF_NAME;
use crate::artifacts::checkout::WorkspaceFile;
use crate::artifacts::core::error::RepositoryError;
use crate::artifacts::database::database_entry::DatabaseEntry;
use crate::artifacts::index::entry_mode::EntryMode;
use crate::artifacts::index::index_entry::IndexEntry;
use crate::artifacts::merge::MergeOutcome;
use crate::artifacts::merge::conflict::render_conflict;
use crate::artifacts::merge::resolution::merge_trees;
use crate::artifacts::objects::commit::{Author, Commit};
use crate::artifacts::objects::object_id::ObjectId;
use bytes::Bytes;

impl Repository {
    /// Merge `target` into HEAD.
    ///
    /// - same commit: [`MergeOutcome::UpToDate`], nothing is written
    /// - no common ancestor: [`RepositoryError::UnrelatedHistories`], nothing is
    ///   written
    /// - divergent edits: conflict markers in the working files and conflicted
    ///   index rows, [`MergeOutcome::Conflicted`], no commit
    /// - otherwise: merged files and index, a two-parent merge commit, and HEAD
    ///   (or the checked-out branch) moved to it
    pub fn merge(&self, target: &str) -> anyhow::Result<MergeOutcome> {
        let _lock = self.lock()?;

        let head_id = self.resolve(HEAD_REF_NAME)?;
        let target_id = self.resolve(target)?;

        if head_id == target_id {
            tracing::info!(commit = %head_id, "already up to date");
            return Ok(MergeOutcome::UpToDate);
        }

        let base_id = self
            .commit_graph()
            .merge_base(&head_id, &target_id)?
            .ok_or(RepositoryError::UnrelatedHistories)?;

        let base_tree = self.database().load_commit_tree(&base_id)?;
        let head_tree = self.database().load_commit_tree(&head_id)?;
        let target_tree = self.database().load_commit_tree(&target_id)?;

        let tree_merge = merge_trees(&base_tree, &head_tree, &target_tree);

        // read and render every working file before anything on disk changes
        let mut files = self.load_workspace_files(&tree_merge.merged)?;
        for path in &tree_merge.conflicts {
            let head_content = self.side_content(head_tree.get(path))?;
            let target_content = self.side_content(target_tree.get(path))?;
            self.workspace().ensure_writable(path)?;

            files.push(WorkspaceFile::new(
                path.clone(),
                render_conflict(&head_content, &target_content).into(),
                EntryMode::Regular,
            ));
        }

        let index_entries = tree_merge
            .merged
            .iter()
            .map(|(path, entry)| IndexEntry::from_database_entry(path.clone(), entry))
            .chain(
                tree_merge
                    .conflicts
                    .iter()
                    .map(|path| IndexEntry::conflicted(path.clone())),
            )
            .collect::<Vec<_>>();

        if !tree_merge.is_clean() {
            self.write_workspace_files(&files)?;
            self.write_merge_index(index_entries)?;

            tracing::info!(
                base = %base_id,
                conflicts = tree_merge.conflicts.len(),
                "merge stopped on conflicts"
            );
            return Ok(MergeOutcome::Conflicted(tree_merge.conflicts));
        }

        let tree_id = self.database().store(&tree_merge.into_tree())?;
        let message = format!("Merge commit {target} into HEAD");
        let commit = Commit::new(
            vec![head_id, target_id],
            tree_id,
            Author::load_from_env(),
            message,
        );
        let commit_id = self.database().store(&commit)?;

        self.write_workspace_files(&files)?;
        self.write_merge_index(index_entries)?;
        self.refs().update_head(&commit_id)?;

        tracing::info!(base = %base_id, commit = %commit_id, "merge commit created");

        Ok(MergeOutcome::Merged(commit_id))
    }

    fn write_merge_index(&self, entries: Vec<IndexEntry>) -> anyhow::Result<()> {
        let mut index = self.index();
        index.rewrite(entries);
        index.write_updates()
    }

    fn side_content(&self, entry: Option<&DatabaseEntry>) -> anyhow::Result<Bytes> {
        match entry {
            Some(entry) => Ok(self.database().parse_object_as_blob(&entry.oid)?.into_content()),
            None => Ok(Bytes::new()),
        }
    }

    /// Merge base of two resolvable names, as used by `merge`.
    pub fn merge_base(&self, left: &str, right: &str) -> anyhow::Result<Option<ObjectId>> {
        let left = self.resolve(left)?;
        let right = self.resolve(right)?;

        self.commit_graph().merge_base(&left, &right)
    }
}
