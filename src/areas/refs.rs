//! References (HEAD, branches, tags)
//!
//! References are human-readable names pointing to commits:
//!
//! - HEAD: symbolic reference naming the checked-out branch, never a commit
//! - Branches: `refs/heads/<name>`, holding the branch head or nothing
//! - Tags: `refs/tags/<name>`, holding the commit the tag was created at
//!
//! ## File Format
//!
//! - HEAD contains `ref: <branch>`
//! - A ref file contains a commit id followed by a newline, or is empty for a branch
//!   without commits
//!
//! Every write replaces the whole file through a temporary file and rename.

use crate::artifacts::branch::branch_name::{BranchName, TagName, is_valid_identifier};
use crate::artifacts::core::atomic_file::write_atomically;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{IoResultExt, RepositoryError, Result};
use derive_new::new;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use walkdir::WalkDir;

/// Regex pattern for parsing the symbolic HEAD reference
const SYMREF_REGEX: &str = r"^ref:\s*(.+)$";

/// Name of the HEAD reference
pub const HEAD_REF_NAME: &str = "HEAD";

pub const REFS_DIR: &str = "refs";
pub const HEADS_DIR: &str = "heads";
pub const TAGS_DIR: &str = "tags";

static SYMREF: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(SYMREF_REGEX).expect("symref regex is valid"));

/// Reference manager for one repository root
#[derive(Debug, new)]
pub struct Refs {
    /// Repository root (the directory holding `HEAD` and `refs/`)
    path: Box<Path>,
}

impl Refs {
    pub fn head_path(&self) -> PathBuf {
        self.path.join(HEAD_REF_NAME)
    }

    pub fn refs_path(&self) -> PathBuf {
        self.path.join(REFS_DIR)
    }

    pub fn heads_path(&self) -> PathBuf {
        self.refs_path().join(HEADS_DIR)
    }

    pub fn tags_path(&self) -> PathBuf {
        self.refs_path().join(TAGS_DIR)
    }

    fn branch_path(&self, branch: &BranchName) -> PathBuf {
        self.heads_path().join(branch.as_ref())
    }

    fn tag_path(&self, tag: &TagName) -> PathBuf {
        self.tags_path().join(tag.as_ref())
    }

    /// Create `refs/heads/` and `refs/tags/`
    pub fn init(&self) -> Result<()> {
        for dir in [self.heads_path(), self.tags_path()] {
            std::fs::create_dir_all(&dir).at_path(&dir)?;
        }
        Ok(())
    }

    /// Branch named by HEAD
    ///
    /// A missing or unreadable HEAD falls back to the default branch.
    pub fn current_branch(&self) -> Result<BranchName> {
        let head_path = self.head_path();

        let content = match std::fs::read_to_string(&head_path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!(path = %head_path.display(), "HEAD missing, assuming default branch");
                return Ok(BranchName::default_branch());
            }
            Err(err) => return Err(RepositoryError::io(head_path, err)),
        };

        let branch = SYMREF
            .captures(content.trim())
            .and_then(|captures| BranchName::try_parse(captures[1].trim()).ok());

        match branch {
            Some(branch) => Ok(branch),
            None => {
                tracing::warn!(content = content.trim(), "unreadable HEAD, assuming default branch");
                Ok(BranchName::default_branch())
            }
        }
    }

    /// Point HEAD at `branch` without checking that the branch exists
    pub fn set_current_branch(&self, branch: &BranchName) -> Result<()> {
        write_atomically(&self.head_path(), format!("ref: {branch}\n").as_bytes())?;
        tracing::debug!(%branch, "moved HEAD");
        Ok(())
    }

    pub fn branch_exists(&self, branch: &BranchName) -> bool {
        self.branch_path(branch).is_file()
    }

    /// Head of `branch`; `None` if the branch has no ref file or no commits
    pub fn read_branch(&self, branch: &BranchName) -> Result<Option<ObjectId>> {
        Self::read_ref_file(&self.branch_path(branch))
    }

    /// Set the head of `branch`, creating its ref file if needed
    pub fn update_branch(&self, branch: &BranchName, oid: &ObjectId) -> Result<()> {
        write_atomically(&self.branch_path(branch), format!("{oid}\n").as_bytes())?;
        tracing::debug!(%branch, oid = %oid, "updated branch head");
        Ok(())
    }

    /// Create a new branch pointing at `oid` (or at nothing)
    pub fn create_branch(&self, branch: &BranchName, oid: Option<&ObjectId>) -> Result<()> {
        if self.branch_exists(branch) {
            return Err(RepositoryError::already_exists("branch", branch));
        }

        let content = oid.map(|oid| format!("{oid}\n")).unwrap_or_default();
        write_atomically(&self.branch_path(branch), content.as_bytes())?;
        tracing::debug!(%branch, "created branch");
        Ok(())
    }

    /// Rename a branch, repointing HEAD if it named the old branch
    ///
    /// If HEAD cannot be rewritten the ref rename is undone.
    pub fn rename_branch(&self, old: &BranchName, new: &BranchName) -> Result<()> {
        if !self.branch_exists(old) {
            return Err(RepositoryError::not_found("branch", old));
        }
        if self.branch_exists(new) {
            return Err(RepositoryError::already_exists("branch", new));
        }

        let head_moves = &self.current_branch()? == old;
        let old_path = self.branch_path(old);
        let new_path = self.branch_path(new);
        std::fs::rename(&old_path, &new_path).at_path(&old_path)?;

        if head_moves {
            if let Err(err) = self.set_current_branch(new) {
                if let Err(rollback) = std::fs::rename(&new_path, &old_path) {
                    tracing::error!(%rollback, "failed to restore renamed branch");
                }
                return Err(err);
            }
        }

        tracing::debug!(%old, %new, "renamed branch");
        Ok(())
    }

    pub fn delete_branch(&self, branch: &BranchName) -> Result<()> {
        if !self.branch_exists(branch) {
            return Err(RepositoryError::not_found("branch", branch));
        }
        if &self.current_branch()? == branch {
            return Err(RepositoryError::CurrentBranch(branch.to_string()));
        }

        let path = self.branch_path(branch);
        std::fs::remove_file(&path).at_path(&path)?;
        tracing::debug!(%branch, "deleted branch");
        Ok(())
    }

    /// Branches sorted by name, with their heads
    pub fn list_branches(&self) -> Result<Vec<(BranchName, Option<ObjectId>)>> {
        Self::list_ref_names(&self.heads_path())?
            .into_iter()
            .map(|name| {
                let branch = BranchName::try_parse(name)?;
                let head = self.read_branch(&branch)?;
                Ok((branch, head))
            })
            .collect()
    }

    /// Head of the branch named by HEAD
    pub fn read_head(&self) -> Result<Option<ObjectId>> {
        self.read_branch(&self.current_branch()?)
    }

    /// Advance the branch named by HEAD
    pub fn update_head(&self, oid: &ObjectId) -> Result<()> {
        self.update_branch(&self.current_branch()?, oid)
    }

    pub fn tag_exists(&self, tag: &TagName) -> bool {
        self.tag_path(tag).is_file()
    }

    pub fn create_tag(&self, tag: &TagName, oid: &ObjectId) -> Result<()> {
        if self.tag_exists(tag) {
            return Err(RepositoryError::already_exists("tag", tag));
        }

        write_atomically(&self.tag_path(tag), format!("{oid}\n").as_bytes())?;
        tracing::debug!(%tag, oid = %oid, "created tag");
        Ok(())
    }

    pub fn read_tag(&self, tag: &TagName) -> Result<Option<ObjectId>> {
        Self::read_ref_file(&self.tag_path(tag))
    }

    /// Tags sorted by name, with the commit each one names
    pub fn list_tags(&self) -> Result<Vec<(TagName, ObjectId)>> {
        let mut tags = Vec::new();

        for name in Self::list_ref_names(&self.tags_path())? {
            let tag = TagName::try_parse(name)?;
            match self.read_tag(&tag)? {
                Some(oid) => tags.push((tag, oid)),
                None => tracing::warn!(%tag, "skipping empty tag"),
            }
        }

        Ok(tags)
    }

    fn read_ref_file(path: &Path) -> Result<Option<ObjectId>> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(RepositoryError::io(path, err)),
        };

        let content = content.trim();
        if content.is_empty() {
            return Ok(None);
        }

        ObjectId::try_parse(content).map(Some).map_err(|_| {
            RepositoryError::Corrupt(format!("{} holds '{content}'", path.display()))
        })
    }

    /// Sorted file names directly under `dir` that are valid identifiers
    fn list_ref_names(dir: &Path) -> Result<Vec<String>> {
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut names = Vec::new();
        for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
            let entry = entry.map_err(|err| {
                let path = err.path().unwrap_or(dir).to_path_buf();
                RepositoryError::io(path, err.into())
            })?;

            if !entry.file_type().is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().to_string();
            if is_valid_identifier(&name) {
                names.push(name);
            }
        }

        names.sort();
        Ok(names)
    }
}
