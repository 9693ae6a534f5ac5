//! Object database
//!
//! Content-addressed storage under `objects/`, one file per object named by its id. Writes
//! are idempotent: storing an object whose file already exists writes nothing and returns
//! the existing id. There is no deletion API; unreachable objects stay until the whole
//! repository is deleted.

use crate::artifacts::core::atomic_file::write_atomically;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::{Object, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{IoResultExt, RepositoryError, Result};
use bytes::Bytes;
use std::io::Cursor;
use std::path::{Path, PathBuf};

const COMMIT_MARKER: &[u8] = b"id=";

#[derive(Debug)]
pub struct Database {
    path: Box<Path>,
}

impl Database {
    pub fn new(path: Box<Path>) -> Self {
        Database { path }
    }

    pub fn objects_path(&self) -> &Path {
        &self.path
    }

    fn object_path(&self, object_id: &ObjectId) -> PathBuf {
        self.path.join(object_id.as_ref())
    }

    pub fn exists(&self, object_id: &ObjectId) -> bool {
        self.object_path(object_id).is_file()
    }

    /// Store an object unless one with the same id is already present
    pub fn store(&self, object: &impl Object) -> Result<ObjectId> {
        let object_id = object.object_id();
        let object_path = self.object_path(&object_id);

        if object_path.exists() {
            tracing::trace!(oid = %object_id, "object already stored");
        } else {
            write_atomically(&object_path, &object.serialize())?;
            tracing::debug!(oid = %object_id, "stored object");
        }

        Ok(object_id)
    }

    pub fn put_blob(&self, content: impl Into<Bytes>) -> Result<ObjectId> {
        self.store(&Blob::new(content.into()))
    }

    pub fn put_commit(&self, commit: &Commit) -> Result<ObjectId> {
        self.store(commit)
    }

    /// Read the raw stored bytes of an object
    pub fn load(&self, object_id: &ObjectId) -> Result<Bytes> {
        let object_path = self.object_path(object_id);

        match std::fs::read(&object_path) {
            Ok(content) => Ok(content.into()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                Err(RepositoryError::not_found("object", object_id))
            }
            Err(err) => Err(RepositoryError::io(object_path, err)),
        }
    }

    pub fn get_blob(&self, object_id: &ObjectId) -> Result<Blob> {
        Blob::deserialize(Cursor::new(self.load(object_id)?))
    }

    /// Load and verify a commit
    pub fn get_commit(&self, object_id: &ObjectId) -> Result<Commit> {
        let content = self.load(object_id).map_err(|err| match err {
            RepositoryError::NotFound { .. } => RepositoryError::not_found("commit", object_id),
            other => other,
        })?;

        // Blobs are stored under the digest of their whole file; a commit's file adds the
        // id line to the hashed body, so it never digests to its own id.
        if !content.starts_with(COMMIT_MARKER) || &ObjectId::digest(&content) == object_id {
            return Err(RepositoryError::NotACommit(object_id.to_string()));
        }

        let commit = Commit::deserialize(Cursor::new(content)).map_err(|err| match err {
            RepositoryError::Corrupt(reason) => {
                RepositoryError::Corrupt(format!("object {object_id}: {reason}"))
            }
            other => other,
        })?;

        if &commit.id() != object_id {
            return Err(RepositoryError::Corrupt(format!(
                "object {object_id} holds commit {}",
                commit.id()
            )));
        }

        Ok(commit)
    }

    /// Create the objects directory
    pub fn init(&self) -> Result<()> {
        std::fs::create_dir_all(&self.path).at_path(&self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::branch::branch_name::BranchName;
    use crate::artifacts::index::index_entry::IndexEntry;
    use crate::artifacts::objects::commit::Timestamp;
    use pretty_assertions::assert_eq;

    fn database(dir: &tempfile::TempDir) -> Database {
        let database = Database::new(dir.path().join("objects").into_boxed_path());
        database.init().unwrap();
        database
    }

    #[test]
    fn put_blob_twice_writes_once() {
        let dir = tempfile::tempdir().unwrap();
        let database = database(&dir);

        let first = database.put_blob(Bytes::from_static(b"same bytes")).unwrap();
        // Overwrite the object file behind the database's back: a second physical write
        // would restore the original content.
        let object_file = database.objects_path().join(first.as_ref());
        std::fs::write(&object_file, b"sentinel").unwrap();
        let second = database.put_blob(Bytes::from_static(b"same bytes")).unwrap();

        assert_eq!(first, second);
        assert_eq!(std::fs::read(&object_file).unwrap(), b"sentinel");
        assert_eq!(std::fs::read_dir(database.objects_path()).unwrap().count(), 1);
    }

    #[test]
    fn blobs_are_stored_verbatim_under_their_digest() {
        let dir = tempfile::tempdir().unwrap();
        let database = database(&dir);

        let oid = database.put_blob(Bytes::from_static(b"\x00binary\xff")).unwrap();

        assert_eq!(oid, ObjectId::digest(b"\x00binary\xff"));
        assert_eq!(database.get_blob(&oid).unwrap().data(), b"\x00binary\xff");
        assert!(database.exists(&oid));
    }

    #[test]
    fn commits_round_trip_through_the_store() {
        let dir = tempfile::tempdir().unwrap();
        let database = database(&dir);
        let blob = database.put_blob(Bytes::from_static(b"a")).unwrap();
        let commit = Commit::new(
            None,
            "alice".to_string(),
            Timestamp::now(),
            BranchName::default_branch(),
            "first".to_string(),
            vec![IndexEntry::new("a.txt".to_string(), blob.clone())],
        );

        let oid = database.put_commit(&commit).unwrap();

        assert_eq!(oid, commit.id());
        assert_eq!(database.get_commit(&oid).unwrap(), commit);
        assert!(matches!(
            database.get_commit(&blob),
            Err(RepositoryError::NotACommit(_))
        ));
    }

    #[test]
    fn blobs_that_look_like_commits_are_not_commits() {
        let dir = tempfile::tempdir().unwrap();
        let database = database(&dir);
        let oid = database
            .put_blob(Bytes::from_static(b"id=looks like a commit\nauthor=alice\n"))
            .unwrap();

        assert!(matches!(
            database.get_commit(&oid),
            Err(RepositoryError::NotACommit(_))
        ));
    }

    #[test]
    fn missing_commits_are_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let database = database(&dir);

        assert!(matches!(
            database.get_commit(&ObjectId::digest(b"nothing")),
            Err(RepositoryError::NotFound { kind: "commit", .. })
        ));
    }
}
