use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::errors::{RepositoryError, Result};

impl Repository {
    pub fn current_branch(&self) -> Result<BranchName> {
        self.refs().current_branch()
    }

    /// Point HEAD at `name` whether or not the branch exists
    pub fn set_current_branch(&self, name: &BranchName) -> Result<()> {
        self.refs().set_current_branch(name)
    }

    /// Check out an existing branch
    pub fn switch_branch(&self, name: &BranchName) -> Result<()> {
        if !self.refs().branch_exists(name) {
            return Err(RepositoryError::not_found("branch", name));
        }

        self.set_current_branch(name)
    }

    /// Check out `name`, creating it lazily if it does not exist
    ///
    /// No ref file is written for a new branch: it appears with the first commit (or merge
    /// or revert) made on it. Returns whether the branch already existed.
    pub fn switch_or_create(&self, name: &BranchName) -> Result<bool> {
        let existed = self.refs().branch_exists(name);
        self.set_current_branch(name)?;

        Ok(existed)
    }
}
