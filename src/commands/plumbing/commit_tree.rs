use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::{Author, Commit};
use crate::artifacts::objects::object_id::ObjectId;

impl Repository {
    /// Create a commit object for `tree` without touching any reference.
    ///
    /// `tree` and every parent go through the resolver; the tree must be a tree
    /// object and each parent a commit.
    pub fn commit_tree(
        &self,
        tree: &str,
        message: &str,
        parents: &[String],
    ) -> anyhow::Result<ObjectId> {
        let tree_oid = self.resolve(tree)?;
        self.database().parse_object_as_tree(&tree_oid)?;

        let parents = parents
            .iter()
            .map(|parent| {
                let parent_oid = self.resolve(parent)?;
                self.database().parse_object_as_commit(&parent_oid)?;
                Ok(parent_oid)
            })
            .collect::<anyhow::Result<Vec<_>>>()?;

        let commit = Commit::new(parents, tree_oid, Author::load_from_env(), message.to_string());

        self.database().store(&commit)
    }
}
