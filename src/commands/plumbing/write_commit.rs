use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::index::index_entry::IndexEntry;
use crate::artifacts::log::log_entry::LogEntry;
use crate::artifacts::objects::commit::{Commit, Timestamp};
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::Result;

impl Repository {
    /// Record a new commit on `branch` and make it the branch head
    ///
    /// Author and message are checked before anything is written.
    pub(crate) fn write_commit(
        &self,
        branch: &BranchName,
        parent: Option<ObjectId>,
        author: &str,
        message: String,
        files: Vec<IndexEntry>,
    ) -> Result<Commit> {
        Commit::check_single_line("author", author)?;
        Commit::check_single_line("message", &message)?;

        let commit = Commit::new(
            parent,
            author.to_string(),
            Timestamp::now(),
            branch.clone(),
            message,
            files,
        );

        self.database().put_commit(&commit)?;
        self.refs().update_branch(branch, &commit.id())?;
        self.commit_log().append(&LogEntry::from(&commit))?;

        Ok(commit)
    }
}
