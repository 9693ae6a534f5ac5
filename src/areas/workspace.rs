//! User files under `workspace/`
//!
//! Paths handed to the workspace are repository-relative and validated before use; a path
//! that resolves outside the workspace directory (for example through a symlink) is
//! rejected.

use crate::artifacts::index::index_entry::IndexEntry;
use crate::errors::{IoResultExt, RepositoryError, Result};
use bytes::Bytes;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn init(&self) -> Result<()> {
        std::fs::create_dir_all(&self.path).at_path(&self.path)
    }

    /// Absolute location of an existing workspace file
    pub fn resolve(&self, relative: &str) -> Result<PathBuf> {
        let relative = IndexEntry::check_path(relative)?;
        let file_path = self.path.join(&relative);

        if !file_path.is_file() {
            return Err(RepositoryError::not_found("file", &relative));
        }

        let root = self.path.canonicalize().at_path(&self.path)?;
        let canonical = file_path.canonicalize().at_path(&file_path)?;
        if !canonical.starts_with(&root) {
            return Err(RepositoryError::InvalidPath {
                path: relative,
                reason: "path resolves outside the workspace",
            });
        }

        Ok(file_path)
    }

    pub fn read_file(&self, relative: &str) -> Result<Bytes> {
        let file_path = self.resolve(relative)?;
        let content = std::fs::read(&file_path).at_path(&file_path)?;
        Ok(content.into())
    }

    /// Delete a workspace file; returns whether there was one
    pub fn remove_file(&self, relative: &str) -> Result<bool> {
        let relative = IndexEntry::check_path(relative)?;
        let file_path = self.path.join(relative);

        match std::fs::remove_file(&file_path) {
            Ok(()) => Ok(true),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(err) => Err(RepositoryError::io(file_path, err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn workspace(dir: &tempfile::TempDir) -> Workspace {
        let workspace = Workspace::new(dir.path().join("workspace").into_boxed_path());
        workspace.init().unwrap();
        workspace
    }

    #[test]
    fn reads_nested_files() {
        let dir = tempfile::tempdir().unwrap();
        let workspace = workspace(&dir);
        std::fs::create_dir_all(workspace.path().join("src")).unwrap();
        std::fs::write(workspace.path().join("src/lib.rs"), "fn main() {}").unwrap();

        assert_eq!(
            workspace.read_file("src/lib.rs").unwrap(),
            Bytes::from_static(b"fn main() {}")
        );
    }

    #[test]
    fn missing_files_are_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let workspace = workspace(&dir);

        assert!(matches!(
            workspace.read_file("nope.txt"),
            Err(RepositoryError::NotFound { kind: "file", .. })
        ));
        assert!(!workspace.remove_file("nope.txt").unwrap());
    }

    #[test]
    fn traversal_is_rejected_before_touching_the_filesystem() {
        let dir = tempfile::tempdir().unwrap();
        let workspace = workspace(&dir);
        std::fs::write(dir.path().join("secret"), "x").unwrap();

        assert!(matches!(
            workspace.read_file("../secret"),
            Err(RepositoryError::InvalidPath { .. })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn symlinks_leaving_the_workspace_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let workspace = workspace(&dir);
        std::fs::write(dir.path().join("secret"), "x").unwrap();
        std::os::unix::fs::symlink(dir.path().join("secret"), workspace.path().join("link"))
            .unwrap();

        assert!(matches!(
            workspace.read_file("link"),
            Err(RepositoryError::InvalidPath { .. })
        ));
    }
}
