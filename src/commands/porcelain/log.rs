use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::log::log_entry::LogEntry;
use crate::artifacts::log::rev_list::RevList;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::Result;

impl Repository {
    /// Up to `limit` commits reachable from the head of `branch`, newest first
    ///
    /// A branch without a ref file or without commits has an empty history.
    pub fn history(&self, branch: &BranchName, limit: usize) -> Result<Vec<Commit>> {
        let start = self.refs().read_branch(branch)?;

        Ok(RevList::new(self.database(), start)
            .into_iter()
            .take(limit)
            .collect())
    }

    /// The `limit` most recent commit log records, newest first
    pub fn journal(&self, limit: usize) -> Result<Vec<LogEntry>> {
        self.commit_log().recent(limit)
    }

    pub fn get_commit(&self, oid: &ObjectId) -> Result<Commit> {
        self.database().get_commit(oid)
    }

    /// Look up a commit by its textual id
    pub fn show(&self, oid: &str) -> Result<Commit> {
        self.get_commit(&ObjectId::try_parse(oid)?)
    }
}
