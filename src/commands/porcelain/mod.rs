//! Porcelain commands (user-facing operations)
//!
//! Porcelain commands provide the high-level workflows. They compose the
//! storage areas, the resolver, the graph walker and the merge engine, and
//! return plain values; rendering belongs to the binary.
//!
//! Every command that mutates the index, a reference or the working tree
//! holds the repository lock for its whole run.
//!
//! ## Commands
//!
//! - `init`: Initialize a new repository
//! - `add`: Stage files for commit
//! - `rm`: Unstage (and optionally delete) a file
//! - `commit`: Create a new commit
//! - `status`: Compare the index with the working tree
//! - `log`: Show first-parent commit history
//! - `reset`: Move HEAD and optionally the index and working tree
//! - `checkout`: Switch branches or detach at a commit
//! - `merge`: Three-way merge of another commit into HEAD, and the merge base
//!   it would use
//! - `branch`: Create or list branches, create tags

pub mod add;
pub mod branch;
pub mod checkout;
pub mod commit;
pub mod init;
pub mod log;
pub mod merge;
pub mod reset;
pub mod rm;
pub mod status;
