//! A small content-addressed version-control engine.
//!
//! The crate is organised the same way a repository is:
//!
//! - [`areas`]: the stateful storage areas (object database, index, refs,
//!   working tree, lock) and the [`Repository`](areas::repository::Repository)
//!   that ties them to one explicit workspace root
//! - [`artifacts`]: the data types and pure algorithms (objects, index rows,
//!   reference names and resolution, history walking, three-way merge)
//! - [`commands`]: plumbing and porcelain operations, implemented on
//!   `Repository`
//!
//! Metadata lives in `<workspace>/.mygit`.

pub mod areas;
pub mod artifacts;
pub mod commands;
pub mod telemetry;
