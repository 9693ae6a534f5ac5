use crate::areas::repository::Repository;
use crate::artifacts::index::index_entry::IndexEntry;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{RepositoryError, Result};

impl Repository {
    /// Commit the staged files on the current branch and clear the index
    ///
    /// The snapshot is the parent's file list with every staged entry laid over it: staged
    /// paths replace the parent's blob id in place, new paths are appended in index order.
    pub fn commit(&self, author: &str, message: &str) -> Result<Commit> {
        let mut index = self.index()?;
        if index.is_empty() {
            return Err(RepositoryError::EmptyIndex);
        }

        let message = message.trim().to_string();
        let branch = self.refs().current_branch()?;
        let parent = self.refs().read_branch(&branch)?;
        let files = self.snapshot(parent.as_ref(), index.entries())?;

        let commit = self.write_commit(&branch, parent, author, message, files)?;

        index.clear();
        index.write_updates()?;

        tracing::info!(
            oid = %commit.id(),
            %branch,
            files = commit.files().len(),
            "committed"
        );
        Ok(commit)
    }

    fn snapshot<'e>(
        &self,
        parent: Option<&ObjectId>,
        staged: impl Iterator<Item = &'e IndexEntry>,
    ) -> Result<Vec<IndexEntry>> {
        let mut files = match parent {
            Some(parent) => self.database().get_commit(parent)?.files().to_vec(),
            None => Vec::new(),
        };

        for entry in staged {
            match files.iter_mut().find(|file| file.path == entry.path) {
                Some(file) => file.oid = entry.oid.clone(),
                None => files.push(entry.clone()),
            }
        }

        Ok(files)
    }
}
