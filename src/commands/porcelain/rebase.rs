use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::merge::{PointerMove, RebaseStrategy};
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::Result;

impl Repository {
    /// Point the current branch at the head of `target`
    ///
    /// No commits are created and the commit log is not touched.
    pub fn rebase(&self, target: &BranchName) -> Result<ObjectId> {
        self.rebase_with(target, &PointerMove)
    }

    pub fn rebase_with(
        &self,
        target: &BranchName,
        strategy: &impl RebaseStrategy,
    ) -> Result<ObjectId> {
        let (current, target_head) = self.combination_heads(target)?;
        let ours = self.refs().read_branch(&current)?;

        let new_head = strategy.rebase_onto(self.database(), ours.as_ref(), &target_head)?;
        self.refs().update_branch(&current, &new_head)?;

        tracing::info!(branch = %current, onto = %target, oid = %new_head, "rebased");
        Ok(new_head)
    }
}
