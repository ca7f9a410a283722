//! Working tree status
//!
//! Compares index rows against the files on disk. There is no HEAD comparison:
//! a row whose content matches its working file is reported as staged.
//!
//! - `file_change`: the categories a path can fall into
//! - `status_info`: the categorized, sorted result

pub mod file_change;
pub mod status_info;
