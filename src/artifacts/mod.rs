//! Repository data structures and policies
//!
//! - `branch`: validated names for branches, tags, repositories and users
//! - `core`: shared filesystem utilities (atomic whole-file writes)
//! - `index`: index entries and their line format
//! - `log`: history traversal and commit log records
//! - `merge`: merge and rebase policies
//! - `objects`: blob and commit objects and their ids
//! - `sync`: whole-tree mirroring for push and pull

pub mod branch;
pub mod core;
pub mod index;
pub mod log;
pub mod merge;
pub mod objects;
pub mod sync;
