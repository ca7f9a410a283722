//! Plumbing commands (low-level operations)
//!
//! Plumbing commands provide direct access to the object database, the index
//! and the reference resolver. They're primarily used for scripting and as
//! building blocks for porcelain commands.
//!
//! ## Commands
//!
//! - `hash-object`: Compute a blob id and optionally store it
//! - `cat-file`: Read an object back
//! - `ls-tree`: List the rows of a tree
//! - `write-tree`: Turn the index into a tree object
//! - `commit-tree`: Create a commit object without moving any reference
//! - `ls-files`: List tracked paths
//! - `rev-parse`: Resolve a name to an object id
//! - `show-ref`: List branches and tags

pub mod cat_file;
pub mod commit_tree;
pub mod hash_object;
pub mod ls_files;
pub mod ls_tree;
pub mod rev_parse;
pub mod show_ref;
pub mod write_tree;
