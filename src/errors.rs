//! Repository error types
//!
//! Every fallible operation in the library returns [`Result`]. The variants mirror the
//! failure kinds a caller can act on: a missing or duplicate name, an unmet precondition
//! (empty index, empty source branch, no commits), an invalid identifier or path, and
//! filesystem failures carrying the path that was being accessed.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors from repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// A commit, branch, tag, object, file or repository does not exist.
    #[error("{kind} '{name}' not found")]
    NotFound { kind: &'static str, name: String },

    /// A branch, tag or repository with the same name already exists.
    #[error("{kind} '{name}' already exists")]
    AlreadyExists { kind: &'static str, name: String },

    #[error("nothing to commit (index empty)")]
    EmptyIndex,

    #[error("branch '{0}' has no commits")]
    EmptySource(String),

    #[error("branch '{0}' has no commits to tag")]
    NoCommits(String),

    #[error("cannot combine branch '{0}' with itself")]
    SelfMerge(String),

    #[error("cannot delete the checked-out branch '{0}'")]
    CurrentBranch(String),

    #[error("'{0}' is not staged")]
    NotStaged(String),

    #[error("remote mirror not found at {}", .0.display())]
    RemoteNotFound(PathBuf),

    /// A name failed the `[A-Za-z0-9._-]+` rule.
    #[error("invalid identifier '{0}': use letters, digits, '.', '_' or '-'")]
    InvalidIdentifier(String),

    /// Owner names starting with `_` name storage-internal directories.
    #[error("owner name '{0}' is reserved")]
    ReservedOwner(String),

    #[error("invalid path '{path}': {reason}")]
    InvalidPath { path: String, reason: &'static str },

    #[error("invalid {field}: must be a single line")]
    InvalidMessage { field: &'static str },

    #[error("invalid visibility '{0}': use 'public' or 'private'")]
    InvalidVisibility(String),

    #[error("invalid object id '{0}'")]
    InvalidObjectId(String),

    #[error("object {0} is not a commit")]
    NotACommit(String),

    #[error("corrupt repository data: {0}")]
    Corrupt(String),

    #[error("'{actor}' may not access {owner}/{repo}")]
    PermissionDenied {
        actor: String,
        owner: String,
        repo: String,
    },

    /// An underlying filesystem failure, wrapped with the attempted path.
    #[error("I/O failure at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl RepositoryError {
    pub fn not_found(kind: &'static str, name: impl ToString) -> Self {
        RepositoryError::NotFound {
            kind,
            name: name.to_string(),
        }
    }

    pub fn already_exists(kind: &'static str, name: impl ToString) -> Self {
        RepositoryError::AlreadyExists {
            kind,
            name: name.to_string(),
        }
    }

    pub fn io(path: impl AsRef<Path>, source: io::Error) -> Self {
        RepositoryError::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, RepositoryError>;

/// Attach the path being accessed to a raw `io::Result`.
pub trait IoResultExt<T> {
    fn at_path(self, path: impl AsRef<Path>) -> Result<T>;
}

impl<T> IoResultExt<T> for io::Result<T> {
    fn at_path(self, path: impl AsRef<Path>) -> Result<T> {
        self.map_err(|source| RepositoryError::io(path, source))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_errors_carry_the_attempted_path() {
        let err = std::fs::read("/definitely/not/here")
            .at_path("/definitely/not/here")
            .unwrap_err();

        match &err {
            RepositoryError::Io { path, .. } => {
                assert_eq!(path, Path::new("/definitely/not/here"))
            }
            other => panic!("unexpected error {other:?}"),
        }
        assert!(err.to_string().contains("/definitely/not/here"));
    }

    #[test]
    fn not_found_names_the_missing_thing() {
        let err = RepositoryError::not_found("branch", "dev");
        assert_eq!(err.to_string(), "branch 'dev' not found");
    }
}
