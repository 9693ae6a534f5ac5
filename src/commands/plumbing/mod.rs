//! Plumbing commands
//!
//! Building blocks the porcelain commands compose:
//!
//! - `hash_object`: store a workspace file as a blob
//! - `write_commit`: store a commit, advance its branch and record it in the commit log

pub mod hash_object;
mod write_commit;
