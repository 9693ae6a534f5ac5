use crate::areas::repository::Repository;
use crate::artifacts::index::index_entry::IndexEntry;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::Result;

impl Repository {
    /// Store the current content of a workspace file as a blob
    pub fn hash_object(&self, path: &str) -> Result<IndexEntry> {
        let path = IndexEntry::check_path(path)?;
        let content = self.workspace().read_file(&path)?;
        let oid: ObjectId = self.database().put_blob(content)?;

        Ok(IndexEntry::new(path, oid))
    }
}
