//! Ancestor sets and merge-base selection over the commit DAG
//!
//! The walker never loads commits itself; it is handed a loader closure that
//! returns the parents of a commit. Production code reads them from the object
//! database, tests from an in-memory graph.
//!
//! ## Merge base
//!
//! `merge_base(a, b)` intersects `ancestors(a)` with `ancestors(b)` and picks:
//!
//! 1. `a` itself if it is common
//! 2. otherwise `b` itself if it is common
//! 3. otherwise the first common commit met while enumerating `a`'s ancestors
//!
//! Step 3 is not a lowest-common-ancestor search. On criss-cross histories it
//! may pick an older ancestor than a full search would, and merge commits
//! created from it record that choice.

use crate::artifacts::objects::object_id::ObjectId;
use std::collections::HashSet;

/// Every commit reachable from a starting commit, the start included.
///
/// Remembers the order in which commits were first reached, since the merge
/// base tie-break depends on it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ancestors {
    order: Vec<ObjectId>,
    members: HashSet<ObjectId>,
}

impl Ancestors {
    pub fn contains(&self, oid: &ObjectId) -> bool {
        self.members.contains(oid)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Commits in discovery order
    pub fn iter(&self) -> impl Iterator<Item = &ObjectId> {
        self.order.iter()
    }

    pub fn is_subset(&self, other: &Ancestors) -> bool {
        self.members.is_subset(&other.members)
    }

    fn insert(&mut self, oid: ObjectId) -> bool {
        if self.members.insert(oid.clone()) {
            self.order.push(oid);
            true
        } else {
            false
        }
    }
}

#[derive(Debug, Clone)]
pub struct CommitGraph<ParentsLoaderFn>
where
    ParentsLoaderFn: Fn(&ObjectId) -> anyhow::Result<Vec<ObjectId>>,
{
    /// Function returning the parent ids of a commit
    parents_loader: ParentsLoaderFn,
}

impl<ParentsLoaderFn> CommitGraph<ParentsLoaderFn>
where
    ParentsLoaderFn: Fn(&ObjectId) -> anyhow::Result<Vec<ObjectId>>,
{
    /// # Example
    ///
    /// ```rust,ignore
    /// let graph = CommitGraph::new(|oid| {
    ///     Ok(database.parse_object_as_commit(oid)?.parents().to_vec())
    /// });
    /// ```
    pub fn new(parents_loader: ParentsLoaderFn) -> Self {
        Self { parents_loader }
    }

    /// Depth-first enumeration of everything reachable from `commit_id`.
    ///
    /// Each commit is loaded at most once, so shared history (diamonds, long
    /// parallel branches) is visited a single time.
    pub fn ancestors(&self, commit_id: &ObjectId) -> anyhow::Result<Ancestors> {
        let mut ancestors = Ancestors::default();
        let mut stack = vec![commit_id.clone()];

        while let Some(oid) = stack.pop() {
            if !ancestors.insert(oid.clone()) {
                continue;
            }

            let parents = (self.parents_loader)(&oid)?;
            // reversed so the first parent is explored first
            stack.extend(
                parents
                    .into_iter()
                    .rev()
                    .filter(|parent| !ancestors.contains(parent)),
            );
        }

        Ok(ancestors)
    }

    /// Common ancestor used as the base of a three-way merge, or `None` when
    /// the two histories share nothing.
    pub fn merge_base(
        &self,
        head_id: &ObjectId,
        target_id: &ObjectId,
    ) -> anyhow::Result<Option<ObjectId>> {
        let head_ancestors = self.ancestors(head_id)?;
        let target_ancestors = self.ancestors(target_id)?;

        let base = if target_ancestors.contains(head_id) {
            Some(head_id.clone())
        } else if head_ancestors.contains(target_id) {
            Some(target_id.clone())
        } else {
            head_ancestors
                .iter()
                .find(|oid| target_ancestors.contains(oid))
                .cloned()
        };

        tracing::debug!(
            head = %head_id,
            target = %target_id,
            base = ?base.as_ref().map(ObjectId::to_string),
            "merge base computed"
        );

        Ok(base)
    }
}
