use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::Result;

impl Repository {
    /// Create a branch at the current branch head (which may be empty)
    pub fn create_branch(&self, name: &BranchName) -> Result<Option<ObjectId>> {
        let head = self.refs().read_head()?;
        self.refs().create_branch(name, head.as_ref())?;

        Ok(head)
    }

    pub fn rename_branch(&self, old: &BranchName, new: &BranchName) -> Result<()> {
        self.refs().rename_branch(old, new)
    }

    pub fn delete_branch(&self, name: &BranchName) -> Result<()> {
        self.refs().delete_branch(name)
    }

    /// Every branch with its head, sorted by name
    pub fn list_branches_with_head(&self) -> Result<Vec<(BranchName, Option<ObjectId>)>> {
        self.refs().list_branches()
    }

    pub fn branch_head(&self, name: &BranchName) -> Result<Option<ObjectId>> {
        self.refs().read_branch(name)
    }
}
