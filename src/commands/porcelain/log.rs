use crate::areas::repository::Repository;
use crate::artifacts::branch::HEAD_REF_NAME;
use crate::artifacts::log::rev_list::RevList;

impl Repository {
    /// First-parent history from `start` (default `HEAD`), newest first.
    pub fn log(&self, start: Option<&str>) -> anyhow::Result<RevList<'_>> {
        let start_oid = self.resolve(start.unwrap_or(HEAD_REF_NAME))?;

        Ok(RevList::new(self.database(), start_oid))
    }
}
