//! Object types and operations
//!
//! All content is stored as immutable objects identified by SHA-1 hashes.
//! There are three types:
//!
//! - **Blob**: File content (raw bytes)
//! - **Tree**: Flat listing of every tracked path (mode, path, object ID)
//! - **Commit**: Snapshot with metadata (author, message, parent commits, tree)
//!
//! All objects implement serialization/deserialization for the object format:
//! `<type> <size>\0<content>`

pub mod blob;
pub mod commit;
pub mod object;
pub mod object_id;
pub mod object_type;
pub mod tree;

/// Length of a SHA-1 hash in hexadecimal format
pub const OBJECT_ID_LENGTH: usize = 40;
