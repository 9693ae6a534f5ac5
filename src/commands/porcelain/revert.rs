use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::Result;

const REVERT_PREFIX: &str = "Revert: ";

impl Repository {
    /// Commit, on the current branch, the snapshot that preceded `target`
    ///
    /// The new commit's files are those of `target`'s parent, or none if `target` is a root
    /// commit. The index is left alone.
    pub fn revert_commit(&self, target: &ObjectId, author: &str) -> Result<Commit> {
        let reverted = self.database().get_commit(target)?;
        let files = match reverted.parent() {
            Some(parent) => self.database().get_commit(parent)?.files().to_vec(),
            None => Vec::new(),
        };

        let branch = self.refs().current_branch()?;
        let parent = self.refs().read_branch(&branch)?;

        let commit = self.write_commit(
            &branch,
            parent,
            author,
            format!("{REVERT_PREFIX}{}", reverted.message()),
            files,
        )?;

        tracing::info!(reverted = %target, oid = %commit.id(), %branch, "reverted");
        Ok(commit)
    }
}
