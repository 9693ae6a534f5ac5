use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::TagName;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{RepositoryError, Result};

impl Repository {
    /// Tag the current branch head
    pub fn create_tag(&self, name: &TagName) -> Result<ObjectId> {
        if self.refs().tag_exists(name) {
            return Err(RepositoryError::already_exists("tag", name));
        }

        let branch = self.refs().current_branch()?;
        let head = self
            .refs()
            .read_branch(&branch)?
            .ok_or_else(|| RepositoryError::NoCommits(branch.to_string()))?;

        self.refs().create_tag(name, &head)?;
        Ok(head)
    }

    /// Tags sorted by name, with the commit each one names
    pub fn list_tags(&self) -> Result<Vec<(TagName, ObjectId)>> {
        self.refs().list_tags()
    }
}
