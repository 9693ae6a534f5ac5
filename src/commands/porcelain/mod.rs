//! Porcelain commands
//!
//! User-facing operations, each implemented on [`Repository`](crate::areas::repository::Repository):
//!
//! - `init`: lay out an empty repository
//! - `add`: stage, unstage and remove files, show staged entries
//! - `ignore`: record ignore patterns
//! - `commit`: record the staged files
//! - `log`: branch history, commit log, single commits
//! - `branch`: create, rename, delete and list branches
//! - `checkout`: read and move HEAD
//! - `tag`: create and list tags
//! - `merge`: combine a branch into the current one
//! - `rebase`: move the current branch onto another
//! - `revert`: undo a commit with a new commit
//! - `sync`: push to and pull from a mirror

pub mod add;
pub mod branch;
pub mod checkout;
pub mod commit;
pub mod ignore;
pub mod init;
pub mod log;
pub mod merge;
pub mod rebase;
pub mod revert;
pub mod sync;
pub mod tag;
