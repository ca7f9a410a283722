use crate::areas::repository::Repository;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::tree::Tree;

impl Repository {
    /// Rows of a tree. `target` may name a tree directly or anything that
    /// resolves to a commit, in which case the commit's tree is listed.
    pub fn ls_tree(&self, target: &str) -> anyhow::Result<Tree> {
        let oid = self.resolve(target)?;

        self.tree_of(&oid)
    }

    fn tree_of(&self, oid: &ObjectId) -> anyhow::Result<Tree> {
        let (object_type, _) = self.database().read(oid)?;

        match object_type {
            ObjectType::Tree => self.database().parse_object_as_tree(oid),
            _ => self.database().load_commit_tree(oid),
        }
    }
}
