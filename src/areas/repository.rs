//! Repository handle
//!
//! A `Repository` owns the path of one repository root and gives access to its areas. It
//! holds no other state: the index is loaded fresh for every operation that needs it, and
//! HEAD is read from disk each time. Operations are implemented in `commands::porcelain`.

use crate::areas::commit_log::CommitLog;
use crate::areas::config::RepoConfig;
use crate::areas::database::Database;
use crate::areas::index::Index;
use crate::areas::refs::Refs;
use crate::areas::workspace::Workspace;
use crate::errors::{RepositoryError, Result};
use std::path::{Path, PathBuf};

pub const OBJECTS_DIR: &str = "objects";
pub const WORKSPACE_DIR: &str = "workspace";
pub const INDEX_FILE: &str = "index";
pub const LOG_FILE: &str = "log";
pub const CONFIG_FILE: &str = "config";
pub const IGNORE_FILE: &str = ".lbitignore";

#[derive(Debug)]
pub struct Repository {
    path: Box<Path>,
    database: Database,
    refs: Refs,
    workspace: Workspace,
    commit_log: CommitLog,
}

impl Repository {
    /// Handle on `path`, which need not be initialised yet
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path: PathBuf = path.into();

        Repository {
            database: Database::new(path.join(OBJECTS_DIR).into_boxed_path()),
            refs: Refs::new(path.clone().into_boxed_path()),
            workspace: Workspace::new(path.join(WORKSPACE_DIR).into_boxed_path()),
            commit_log: CommitLog::new(path.join(LOG_FILE).into_boxed_path()),
            path: path.into_boxed_path(),
        }
    }

    /// Handle on an existing repository
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let repository = Self::new(path);

        if !repository.refs.head_path().is_file() {
            return Err(RepositoryError::not_found(
                "repository",
                repository.path.display(),
            ));
        }

        Ok(repository)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn commit_log(&self) -> &CommitLog {
        &self.commit_log
    }

    pub fn index_path(&self) -> PathBuf {
        self.path.join(INDEX_FILE)
    }

    pub fn config_path(&self) -> PathBuf {
        self.path.join(CONFIG_FILE)
    }

    pub fn ignore_path(&self) -> PathBuf {
        self.path.join(IGNORE_FILE)
    }

    /// The index as currently stored on disk
    pub fn index(&self) -> Result<Index> {
        let mut index = Index::new(self.index_path().into_boxed_path());
        index.rehydrate()?;
        Ok(index)
    }

    pub fn config(&self) -> Result<RepoConfig> {
        RepoConfig::load(&self.config_path())
    }
}
