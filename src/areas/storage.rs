//! Storage root
//!
//! All repositories live under one storage directory, keyed by owner and name:
//!
//! ```text
//! <storage>/<owner>/<repo>/            repository roots
//! <storage>/_remotes/<owner>/<repo>/   push/pull mirrors
//! ```
//!
//! Owner directories starting with `_` are reserved: they are never listed as owners, and
//! no repository can be created, opened or deleted under them.

use crate::areas::config::{CREATED_KEY, NAME_KEY, OWNER_KEY, Visibility};
use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::{RepoName, UserName, is_valid_identifier};
use crate::artifacts::objects::commit::Timestamp;
use crate::artifacts::sync::mirror::remove_entry;
use crate::errors::{IoResultExt, RepositoryError, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub const REMOTES_DIR: &str = "_remotes";
const RESERVED_PREFIX: char = '_';
const FORK_SUFFIX: &str = "-fork";
const MAX_FORK_COUNTER: u32 = 100;

#[derive(Debug, Clone)]
pub struct Storage {
    root: PathBuf,
}

impl Storage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Storage { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn repo_path(&self, owner: &UserName, name: &RepoName) -> PathBuf {
        self.root.join(owner.as_ref()).join(name.as_ref())
    }

    /// Location of the mirror `push` and `pull` use for a repository
    pub fn remote_path(&self, owner: &UserName, name: &RepoName) -> PathBuf {
        self.root
            .join(REMOTES_DIR)
            .join(owner.as_ref())
            .join(name.as_ref())
    }

    pub fn repo_exists(&self, owner: &UserName, name: &RepoName) -> bool {
        !is_reserved(owner) && self.repo_path(owner, name).is_dir()
    }

    pub fn create_repo(&self, owner: &UserName, name: &RepoName) -> Result<Repository> {
        check_owner(owner)?;
        let path = self.repo_path(owner, name);
        if path.exists() {
            return Err(RepositoryError::already_exists(
                "repository",
                format!("{owner}/{name}"),
            ));
        }

        let repository = Repository::new(path);
        repository.init(owner, name)?;
        tracing::info!(%owner, %name, "created repository");
        Ok(repository)
    }

    pub fn open_repo(&self, owner: &UserName, name: &RepoName) -> Result<Repository> {
        check_owner(owner)?;
        if !self.repo_exists(owner, name) {
            return Err(RepositoryError::not_found(
                "repository",
                format!("{owner}/{name}"),
            ));
        }

        Repository::open(self.repo_path(owner, name))
    }

    /// Remove a repository and everything in it
    pub fn delete_repo(&self, owner: &UserName, name: &RepoName) -> Result<()> {
        check_owner(owner)?;
        if !self.repo_exists(owner, name) {
            return Err(RepositoryError::not_found(
                "repository",
                format!("{owner}/{name}"),
            ));
        }

        remove_entry(&self.repo_path(owner, name))?;
        tracing::info!(%owner, %name, "deleted repository");
        Ok(())
    }

    /// Sorted names of `owner`'s repositories
    pub fn list_repos(&self, owner: &UserName) -> Result<Vec<RepoName>> {
        check_owner(owner)?;
        Self::list_dirs(&self.root.join(owner.as_ref()))?
            .into_iter()
            .map(RepoName::try_parse)
            .collect()
    }

    /// Every repository in the storage, sorted by owner then name
    pub fn list_all_repos(&self) -> Result<Vec<(UserName, RepoName)>> {
        let mut repos = Vec::new();

        for owner in Self::list_dirs(&self.root)? {
            let owner = UserName::try_parse(owner)?;
            if is_reserved(&owner) {
                continue;
            }
            for name in self.list_repos(&owner)? {
                repos.push((owner.clone(), name));
            }
        }

        Ok(repos)
    }

    pub fn visibility(&self, owner: &UserName, name: &RepoName) -> Result<Visibility> {
        Ok(self.open_repo(owner, name)?.config()?.visibility())
    }

    pub fn set_visibility(
        &self,
        owner: &UserName,
        name: &RepoName,
        visibility: Visibility,
    ) -> Result<()> {
        let repository = self.open_repo(owner, name)?;
        let mut config = repository.config()?;
        config.set_visibility(visibility);
        config.save(&repository.config_path())?;

        tracing::info!(%owner, %name, %visibility, "changed visibility");
        Ok(())
    }

    /// Copy `owner/name` into a new repository owned by `actor`
    ///
    /// The fork is named `<name>-fork`, or `<name>-fork<N>` with the first free `N` from 1 to
    /// 100. Its config describes the fork, not the source.
    pub fn fork(&self, owner: &UserName, name: &RepoName, actor: &UserName) -> Result<RepoName> {
        let source = self.open_repo(owner, name)?;

        let fork_name = self.free_fork_name(name, actor)?;
        let fork = self.create_repo(actor, &fork_name)?;
        fork.pull(source.path())?;

        let mut config = fork.config()?;
        config.set(OWNER_KEY, actor.to_string());
        config.set(NAME_KEY, fork_name.to_string());
        config.set(CREATED_KEY, Timestamp::now().to_string());
        config.save(&fork.config_path())?;

        tracing::info!(source = %format!("{owner}/{name}"), fork = %format!("{actor}/{fork_name}"), "forked repository");
        Ok(fork_name)
    }

    /// Hand `owner/name` over to `new_owner`, keeping its name
    ///
    /// The repository's mirror moves along with it, and its config names the new owner.
    pub fn transfer(&self, owner: &UserName, name: &RepoName, new_owner: &UserName) -> Result<()> {
        check_owner(new_owner)?;
        let source = self.open_repo(owner, name)?;

        let target = self.repo_path(new_owner, name);
        if target.exists() {
            return Err(RepositoryError::already_exists(
                "repository",
                format!("{new_owner}/{name}"),
            ));
        }
        let source_mirror = self.remote_path(owner, name);
        let target_mirror = self.remote_path(new_owner, name);
        if source_mirror.exists() && target_mirror.exists() {
            return Err(RepositoryError::already_exists(
                "mirror",
                format!("{new_owner}/{name}"),
            ));
        }

        move_dir(source.path(), &target)?;
        if source_mirror.exists() {
            move_dir(&source_mirror, &target_mirror)?;
        }

        let repository = Repository::open(target)?;
        let mut config = repository.config()?;
        config.set(OWNER_KEY, new_owner.to_string());
        config.save(&repository.config_path())?;

        tracing::info!(source = %format!("{owner}/{name}"), %new_owner, "transferred repository");
        Ok(())
    }

    /// Copy `owner/name` into `destination`, a directory outside the storage
    pub fn clone_repo(
        &self,
        owner: &UserName,
        name: &RepoName,
        destination: &Path,
    ) -> Result<Repository> {
        let source = self.open_repo(owner, name)?;
        if destination.exists() {
            return Err(RepositoryError::already_exists(
                "directory",
                destination.display(),
            ));
        }

        let clone = Repository::new(destination);
        clone.pull(source.path())?;

        tracing::info!(source = %format!("{owner}/{name}"), destination = %destination.display(), "cloned repository");
        Ok(clone)
    }

    fn free_fork_name(&self, name: &RepoName, actor: &UserName) -> Result<RepoName> {
        let base = format!("{name}{FORK_SUFFIX}");

        let candidates = std::iter::once(base.clone())
            .chain((1..=MAX_FORK_COUNTER).map(|counter| format!("{base}{counter}")));

        for candidate in candidates {
            let candidate = RepoName::try_parse(candidate)?;
            if !self.repo_path(actor, &candidate).exists() {
                return Ok(candidate);
            }
        }

        Err(RepositoryError::already_exists(
            "repository",
            format!("{actor}/{base}{MAX_FORK_COUNTER}"),
        ))
    }

    /// Sorted directory names directly under `dir` that are valid identifiers
    fn list_dirs(dir: &Path) -> Result<Vec<String>> {
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut names = Vec::new();
        for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
            let entry = entry.map_err(|err| {
                let path = err.path().unwrap_or(dir).to_path_buf();
                RepositoryError::io(path, err.into())
            })?;

            let name = entry.file_name().to_string_lossy().to_string();
            if entry.file_type().is_dir() && is_valid_identifier(&name) {
                names.push(name);
            }
        }

        names.sort();
        Ok(names)
    }
}

fn move_dir(from: &Path, to: &Path) -> Result<()> {
    if let Some(parent) = to.parent() {
        std::fs::create_dir_all(parent).at_path(parent)?;
    }
    std::fs::rename(from, to).at_path(from)
}

fn is_reserved(owner: &UserName) -> bool {
    owner.as_ref().starts_with(RESERVED_PREFIX)
}

fn check_owner(owner: &UserName) -> Result<()> {
    if is_reserved(owner) {
        return Err(RepositoryError::ReservedOwner(owner.to_string()));
    }
    Ok(())
}
