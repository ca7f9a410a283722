//! Repository data structures and algorithms
//!
//! - `branch`: Branch names and revision resolution
//! - `checkout`: Reset/checkout synchronisation modes
//! - `core`: Shared utilities (errors, atomic file replacement)
//! - `database`: Database entry types
//! - `index`: Index row types
//! - `log`: Commit history traversal and merge-base selection
//! - `merge`: Three-way tree resolution and conflict rendering
//! - `objects`: Object types (blob, tree, commit)
//! - `status`: Working tree status categories

pub mod branch;
pub mod checkout;
pub mod core;
pub mod database;
pub mod index;
pub mod log;
pub mod merge;
pub mod objects;
pub mod status;
