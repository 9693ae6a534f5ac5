//! Branch combination policies
//!
//! Merge and rebase are deliberately non-conflict-resolving:
//!
//! - [`TakeTheirs`] builds the merge snapshot from the source branch head alone. The
//!   current branch's files are replaced wholesale, with no union and no per-file comparison.
//! - [`PointerMove`] "rebases" by pointing the current branch at the target head. Nothing is
//!   replayed, and commits only reachable from the old head become unreachable from the
//!   branch.
//!
//! Both sit behind traits so a three-way merge or a replaying rebase can be plugged into
//! [`Repository::merge_with`](crate::areas::repository::Repository::merge_with) and
//! [`Repository::rebase_with`](crate::areas::repository::Repository::rebase_with)
//! without touching callers.

use crate::areas::database::Database;
use crate::artifacts::index::index_entry::IndexEntry;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::Result;

/// Author recorded on merge commits
pub const MERGE_AUTHOR: &str = "merge";

/// Produces the file list of a merge commit
pub trait MergeStrategy {
    fn merge_files(
        &self,
        database: &Database,
        ours: Option<&Commit>,
        theirs: &Commit,
    ) -> Result<Vec<IndexEntry>>;
}

/// Produces the new head of the current branch for a rebase
pub trait RebaseStrategy {
    fn rebase_onto(
        &self,
        database: &Database,
        ours: Option<&ObjectId>,
        theirs: &ObjectId,
    ) -> Result<ObjectId>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TakeTheirs;

impl MergeStrategy for TakeTheirs {
    fn merge_files(
        &self,
        _database: &Database,
        _ours: Option<&Commit>,
        theirs: &Commit,
    ) -> Result<Vec<IndexEntry>> {
        Ok(theirs.files().to_vec())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PointerMove;

impl RebaseStrategy for PointerMove {
    fn rebase_onto(
        &self,
        _database: &Database,
        _ours: Option<&ObjectId>,
        theirs: &ObjectId,
    ) -> Result<ObjectId> {
        Ok(theirs.clone())
    }
}
