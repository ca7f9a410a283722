use crate::areas::refs::Head;
use crate::areas::repository::Repository;
use crate::artifacts::branch::HEAD_REF_NAME;
use crate::artifacts::branch::branch_name::{BranchName, SymRefName};
use crate::artifacts::objects::object_id::ObjectId;

/// One line of the branch listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchListing {
    pub name: String,
    pub oid: ObjectId,
    pub is_current: bool,
}

impl Repository {
    /// Create a branch at `source_refname`, or at HEAD when none is given.
    pub fn branch(
        &self,
        branch_name: &str,
        source_refname: Option<&str>,
    ) -> anyhow::Result<ObjectId> {
        let _lock = self.lock()?;
        let branch_name = BranchName::try_parse(branch_name.to_string())?;

        let source_oid = self.resolve(source_refname.unwrap_or(HEAD_REF_NAME))?;
        self.database().parse_object_as_commit(&source_oid)?;

        self.refs().create_branch(&branch_name, &source_oid)?;

        tracing::info!(branch = %branch_name, commit = %source_oid, "branch created");

        Ok(source_oid)
    }

    /// Every branch, sorted, flagging the one HEAD is attached to.
    pub fn branches(&self) -> anyhow::Result<Vec<BranchListing>> {
        let current = match self.refs().read_head()? {
            Head::Symbolic(sym_ref_name) => Some(sym_ref_name),
            Head::Detached(_) => None,
        };

        Ok(self
            .refs()
            .list_branches()?
            .into_iter()
            .filter_map(|(oid, sym_ref_name)| {
                let is_current = current.as_ref() == Some(&sym_ref_name);
                let name = sym_ref_name.branch_name()?.to_string();
                Some(BranchListing {
                    name,
                    oid,
                    is_current,
                })
            })
            .collect())
    }

    /// Lightweight tag at HEAD.
    pub fn tag(&self, tag_name: &str) -> anyhow::Result<ObjectId> {
        let _lock = self.lock()?;
        let tag_name = BranchName::try_parse(tag_name.to_string())?;

        let target_oid = self.resolve(HEAD_REF_NAME)?;
        self.refs().create_tag(&tag_name, &target_oid)?;

        tracing::info!(tag = %SymRefName::for_tag(&tag_name), commit = %target_oid, "tag created");

        Ok(target_oid)
    }
}
