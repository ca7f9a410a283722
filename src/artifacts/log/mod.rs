//! Commit history traversal
//!
//! - `rev_list`: first-parent walk used by `log`
//! - `commit_graph`: ancestor sets and merge-base selection used by `merge`
//!
//! ## Algorithm
//!
//! Both walkers work on parent links only and keep explicit state (the
//! current commit, or a visited set), so they terminate on any DAG including
//! diamonds produced by merges.

pub mod commit_graph;
pub mod rev_list;
