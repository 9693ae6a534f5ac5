//! Index file format
//!
//! The index is a plain text file with one staged file per line:
//!
//! ```text
//! <repo-relative path>\t<blob id>
//! ```
//!
//! Lines are kept in first-insertion order. The same `<path>\t<id>` line format is used for
//! the file list inside commit objects.

pub mod index_entry;

/// Separator between the path and the blob id of an entry
pub const ENTRY_SEPARATOR: char = '\t';
