use crate::areas::repository::Repository;
use crate::artifacts::index::index_entry::IndexEntry;
use crate::errors::Result;

impl Repository {
    /// Store a workspace file as a blob and stage it
    pub fn add(&self, path: &str) -> Result<IndexEntry> {
        let mut index = self.index()?;

        let entry = self.hash_object(path)?;
        index.add(entry.clone());
        index.write_updates()?;

        tracing::debug!(path = %entry.path, oid = %entry.oid, "staged file");
        Ok(entry)
    }

    /// Unstage a path, leaving the workspace file alone
    pub fn reset(&self, path: &str) -> Result<IndexEntry> {
        let mut index = self.index()?;

        let entry = index.remove(path)?;
        index.write_updates()?;

        Ok(entry)
    }

    /// Unstage a path and delete its workspace file
    ///
    /// The index is only rewritten once the file is gone, so a failed delete leaves the path
    /// staged.
    pub fn remove(&self, path: &str) -> Result<IndexEntry> {
        let mut index = self.index()?;

        let entry = index.remove(path)?;
        let deleted = self.workspace().remove_file(&entry.path)?;
        index.write_updates()?;

        tracing::debug!(path = %entry.path, deleted, "removed file");
        Ok(entry)
    }

    /// Staged entries in index order
    pub fn status(&self) -> Result<Vec<IndexEntry>> {
        Ok(self.index()?.into_entries())
    }
}
