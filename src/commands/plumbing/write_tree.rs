use crate::areas::repository::Repository;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;

impl Repository {
    /// Store the staged rows as a tree object.
    pub fn write_tree(&self) -> anyhow::Result<ObjectId> {
        let mut index = self.index();

        // Load the index file from the disk
        index.rehydrate()?;

        let payload = index.read_as_tree_payload()?;
        let tree_id = self.database().write(ObjectType::Tree, &payload)?;

        tracing::debug!(tree = %tree_id, rows = index.len(), "tree written from index");

        Ok(tree_id)
    }
}
