use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::{Author, Commit};
use crate::artifacts::objects::object_id::ObjectId;

/// What `commit` produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitSummary {
    pub oid: ObjectId,
    /// No parent: first commit on an unborn branch
    pub is_root: bool,
    pub short_message: String,
}

impl Repository {
    pub fn commit(&self, message: &str) -> anyhow::Result<CommitSummary> {
        let _lock = self.lock()?;
        let tree_id = self.write_tree()?;

        let parent = self.refs().read_head_oid()?;
        let is_root = parent.is_none();

        let author = Author::load_from_env();
        let message = message.trim().to_string();

        let commit = Commit::new(parent.into_iter().collect(), tree_id, author, message);
        let commit_id = self.database().store(&commit)?;
        self.refs().update_head(&commit_id)?;

        tracing::info!(commit = %commit_id, root = is_root, "commit created");

        Ok(CommitSummary {
            oid: commit_id,
            is_root,
            short_message: commit.short_message(),
        })
    }
}
