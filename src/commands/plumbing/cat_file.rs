use crate::areas::repository::Repository;
use crate::artifacts::core::error::RepositoryError;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use bytes::Bytes;

impl Repository {
    /// Kind and raw payload of a stored object.
    pub fn cat_file(&self, object_id: &str) -> anyhow::Result<(ObjectType, Bytes)> {
        let object_id = ObjectId::try_parse(object_id.trim().to_string())
            .map_err(|_| RepositoryError::ObjectNotFound(object_id.to_string()))?;

        self.database().read(&object_id)
    }
}
