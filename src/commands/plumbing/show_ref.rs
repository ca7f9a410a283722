use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::SymRefName;
use crate::artifacts::objects::object_id::ObjectId;

impl Repository {
    /// Every branch, then every tag, as `(id, full ref path)`.
    pub fn show_ref(&self) -> anyhow::Result<Vec<(ObjectId, SymRefName)>> {
        self.refs().list_refs()
    }
}
