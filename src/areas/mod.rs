//! Core repository components
//!
//! This module contains the stateful storage areas of a repository:
//!
//! - `database`: Object database for storing blobs, trees, and commits
//! - `index`: Staging area for tracking file changes
//! - `lock`: Repository-wide advisory lock for mutating operations
//! - `refs`: Reference management (branches, HEAD, tags)
//! - `repository`: High-level repository operations and coordination
//! - `workspace`: Working directory file system operations

pub mod database;
pub mod index;
pub mod lock;
pub mod refs;
pub mod repository;
pub mod workspace;
