use crate::areas::repository::Repository;
use crate::artifacts::objects::object_id::ObjectId;

impl Repository {
    pub fn rev_parse(&self, name: &str) -> anyhow::Result<ObjectId> {
        self.resolve(name)
    }
}
