use crate::areas::refs::Head;
use crate::areas::repository::Repository;
use crate::artifacts::branch::HEAD_REF_NAME;
use crate::artifacts::branch::branch_name::{BranchName, SymRefName};
use crate::artifacts::checkout::ResetMode;
use crate::artifacts::objects::object_id::ObjectId;

/// What HEAD is like after a checkout
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutTarget {
    /// HEAD is symbolic to this branch
    Branch(BranchName),
    /// HEAD points straight at a commit
    Detached(ObjectId),
}

impl Repository {
    /// Switch HEAD and materialize the target commit with a hard sync.
    ///
    /// With `create_branch`, a new branch is created at the current HEAD commit
    /// (failing if it already exists) and checked out. Otherwise `target` is
    /// resolved; an existing branch of exactly that name is checked out
    /// symbolically, anything else detaches HEAD at the resolved commit.
    pub fn checkout(
        &self,
        target: Option<&str>,
        create_branch: Option<&str>,
    ) -> anyhow::Result<CheckoutTarget> {
        let _lock = self.lock()?;

        let new_branch = create_branch
            .map(|name| BranchName::try_parse(name.to_string()))
            .transpose()?;
        let (target, commit_id) = match create_branch {
            Some(name) => (name, self.resolve(HEAD_REF_NAME)?),
            None => {
                let target =
                    target.ok_or_else(|| anyhow::anyhow!("checkout requires a target"))?;
                (target, self.resolve(target)?)
            }
        };
        // refuse non-commits, unreadable blobs and blocked paths before HEAD moves
        self.database().parse_object_as_commit(&commit_id)?;
        let plan = self.plan_sync(&commit_id, ResetMode::Hard)?;

        if let Some(branch_name) = &new_branch {
            self.refs().create_branch(branch_name, &commit_id)?;
        }

        let branch_name = BranchName::try_parse(target.to_string())
            .ok()
            .filter(|branch_name| self.refs().branch_exists(branch_name));

        let checked_out = match branch_name {
            Some(branch_name) => {
                self.refs()
                    .set_head(&Head::Symbolic(SymRefName::for_branch(&branch_name)))?;
                CheckoutTarget::Branch(branch_name)
            }
            None => {
                self.refs().set_head(&Head::Detached(commit_id.clone()))?;
                CheckoutTarget::Detached(commit_id.clone())
            }
        };

        self.apply_sync(plan)?;

        tracing::info!(target = target, commit = %commit_id, "checked out");

        Ok(checked_out)
    }
}
