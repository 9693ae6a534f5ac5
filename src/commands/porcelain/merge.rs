use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::merge::{MERGE_AUTHOR, MergeStrategy, TakeTheirs};
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{RepositoryError, Result};

impl Repository {
    /// Merge `source` into the current branch, taking the source head's files wholesale
    pub fn merge(&self, source: &BranchName) -> Result<Commit> {
        self.merge_with(source, &TakeTheirs)
    }

    pub fn merge_with(&self, source: &BranchName, strategy: &impl MergeStrategy) -> Result<Commit> {
        let (current, source_head) = self.combination_heads(source)?;

        let ours = self
            .refs()
            .read_branch(&current)?
            .map(|oid| self.database().get_commit(&oid))
            .transpose()?;
        let theirs = self.database().get_commit(&source_head)?;
        let files = strategy.merge_files(self.database(), ours.as_ref(), &theirs)?;

        let commit = self.write_commit(
            &current,
            ours.as_ref().map(Commit::id),
            MERGE_AUTHOR,
            format!("Merge branch '{source}' into '{current}'"),
            files,
        )?;

        tracing::info!(%source, into = %current, oid = %commit.id(), "merged");
        Ok(commit)
    }

    /// Current branch and the head of `source`, checking they can be combined
    pub(crate) fn combination_heads(&self, source: &BranchName) -> Result<(BranchName, ObjectId)> {
        let current = self.refs().current_branch()?;
        if &current == source {
            return Err(RepositoryError::SelfMerge(source.to_string()));
        }

        let source_head = self
            .refs()
            .read_branch(source)?
            .ok_or_else(|| RepositoryError::EmptySource(source.to_string()))?;

        Ok((current, source_head))
    }
}
