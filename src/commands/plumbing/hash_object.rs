use crate::areas::repository::Repository;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use std::path::Path;

impl Repository {
    /// Blob id of a workspace file, stored in the database only when `write`.
    pub fn hash_object(&self, object_path: &Path, write: bool) -> anyhow::Result<ObjectId> {
        let relative_path = self.workspace().relative_path(object_path)?;
        let blob = self.workspace().parse_blob(&relative_path)?;

        if write {
            self.database().store(&blob)
        } else {
            blob.object_id()
        }
    }
}
