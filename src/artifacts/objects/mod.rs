//! Stored objects
//!
//! The database holds two kinds of objects, both addressed by the SHA-256 of their hashed
//! content:
//!
//! - **Blob**: the verbatim bytes of a staged workspace file
//! - **Commit**: a snapshot record naming its parent, author, branch, message and files
//!
//! Blobs are stored exactly as hashed. Commits are stored as an `id=<id>` line followed by
//! the hashed body, so the id can be verified when the commit is read back.

pub mod blob;
pub mod commit;
pub mod object;
pub mod object_id;

/// Length of a SHA-256 hash in hexadecimal format
pub const OBJECT_ID_LENGTH: usize = 64;
