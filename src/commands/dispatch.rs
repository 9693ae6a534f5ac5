//! Request dispatch
//!
//! [`Dispatcher`] is the single entry point for running operations on behalf of an actor.
//! It resolves the repository in storage, checks the actor's access and runs the request:
//!
//! - mutating requests need write access
//! - read-only requests need the repository to be public, or write access
//!
//! Repository-level operations (create, delete, list, visibility, fork, transfer, clone)
//! have their own methods with the same checks. Access is decided before the repository is
//! looked up, so an actor without access cannot tell a private repository from a missing one.

use crate::areas::access::{AccessPolicy, Actor, OwnerPolicy};
use crate::areas::config::Visibility;
use crate::areas::repository::Repository;
use crate::areas::storage::Storage;
use crate::artifacts::branch::branch_name::{RepoName, UserName};
use crate::commands::request::Request;
use crate::commands::response::Response;
use crate::errors::{RepositoryError, Result};
use std::path::Path;

pub struct Dispatcher<P: AccessPolicy = OwnerPolicy> {
    storage: Storage,
    policy: P,
}

impl Dispatcher<OwnerPolicy> {
    pub fn with_owner_policy(storage: Storage) -> Self {
        let policy = OwnerPolicy::new(storage.clone());
        Dispatcher { storage, policy }
    }
}

impl<P: AccessPolicy> Dispatcher<P> {
    pub fn new(storage: Storage, policy: P) -> Self {
        Dispatcher { storage, policy }
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    /// Run `request` against `owner/repo` as `actor`
    pub fn execute(
        &self,
        actor: &Actor,
        owner: &UserName,
        repo: &RepoName,
        request: Request,
    ) -> Result<Response> {
        if request.is_mutating() {
            self.require_write(actor, owner, repo)?;
        } else {
            self.require_read(actor, owner, repo)?;
        }
        let repository = self.storage.open_repo(owner, repo)?;

        tracing::debug!(actor = %actor.name, %owner, %repo, ?request, "executing");
        self.run(&repository, actor, owner, repo, request)
    }

    fn run(
        &self,
        repository: &Repository,
        actor: &Actor,
        owner: &UserName,
        repo: &RepoName,
        request: Request,
    ) -> Result<Response> {
        let response = match request {
            Request::Add { path } => Response::Staged(repository.add(&path)?),
            Request::Reset { path } => Response::Unstaged(repository.reset(&path)?),
            Request::Remove { path } => Response::Removed(repository.remove(&path)?),
            Request::Status => Response::Status {
                branch: repository.current_branch()?,
                entries: repository.status()?,
            },
            Request::Ignore { pattern } => Response::Ignored(repository.add_ignore_pattern(&pattern)?),
            Request::IgnorePatterns => Response::IgnorePatterns(repository.ignore_patterns()?),
            Request::Commit { message } => {
                Response::Committed(repository.commit(actor.name.as_ref(), &message)?)
            }
            Request::Log { branch, limit } => {
                let branch = match branch {
                    Some(branch) => branch,
                    None => repository.current_branch()?,
                };
                Response::History(repository.history(&branch, limit)?)
            }
            Request::Journal { limit } => Response::Journal(repository.journal(limit)?),
            Request::Show { oid } => Response::Commit(repository.show(&oid)?),
            Request::Revert { oid } => {
                Response::Reverted(repository.revert_commit(&oid, actor.name.as_ref())?)
            }
            Request::CreateBranch { name } => {
                let head = repository.create_branch(&name)?;
                Response::BranchCreated { name, head }
            }
            Request::ListBranches => Response::Branches {
                current: repository.current_branch()?,
                branches: repository.list_branches_with_head()?,
            },
            Request::RenameBranch { old, new } => {
                repository.rename_branch(&old, &new)?;
                Response::BranchRenamed { old, new }
            }
            Request::DeleteBranch { name } => {
                repository.delete_branch(&name)?;
                Response::BranchDeleted(name)
            }
            Request::Switch { name } => {
                repository.switch_branch(&name)?;
                Response::Switched {
                    branch: name,
                    existed: true,
                }
            }
            Request::SwitchOrCreate { name } => {
                let existed = repository.switch_or_create(&name)?;
                Response::Switched {
                    branch: name,
                    existed,
                }
            }
            Request::Merge { source } => Response::Merged(repository.merge(&source)?),
            Request::Rebase { target } => {
                let head = repository.rebase(&target)?;
                Response::Rebased {
                    branch: repository.current_branch()?,
                    head,
                }
            }
            Request::CreateTag { name } => {
                let oid = repository.create_tag(&name)?;
                Response::TagCreated { name, oid }
            }
            Request::ListTags => Response::Tags(repository.list_tags()?),
            Request::Push => Response::Pushed {
                files: repository.push(&self.storage.remote_path(owner, repo))?,
            },
            Request::Pull => Response::Pulled {
                files: repository.pull(&self.storage.remote_path(owner, repo))?,
            },
        };

        Ok(response)
    }

    /// Create a repository owned by the actor
    pub fn create_repo(&self, actor: &Actor, name: &RepoName) -> Result<Response> {
        self.storage.create_repo(&actor.name, name)?;

        Ok(Response::RepoCreated {
            owner: actor.name.clone(),
            name: name.clone(),
        })
    }

    pub fn delete_repo(&self, actor: &Actor, owner: &UserName, name: &RepoName) -> Result<Response> {
        self.require_write(actor, owner, name)?;
        self.storage.delete_repo(owner, name)?;

        Ok(Response::RepoDeleted {
            owner: owner.clone(),
            name: name.clone(),
        })
    }

    /// Repositories of `owner` (or of every owner) that the actor may read
    pub fn list_repos(&self, actor: &Actor, owner: Option<&UserName>) -> Result<Response> {
        let repos = match owner {
            Some(owner) => self
                .storage
                .list_repos(owner)?
                .into_iter()
                .map(|name| (owner.clone(), name))
                .collect(),
            None => self.storage.list_all_repos()?,
        };

        Ok(Response::Repos(
            repos
                .into_iter()
                .filter(|(owner, name)| self.policy.can_read(owner, name, actor))
                .collect(),
        ))
    }

    /// Read the visibility of a repository, or change it when `visibility` is given
    pub fn visibility(
        &self,
        actor: &Actor,
        owner: &UserName,
        name: &RepoName,
        visibility: Option<Visibility>,
    ) -> Result<Response> {
        let visibility = match visibility {
            Some(visibility) => {
                self.require_write(actor, owner, name)?;
                self.storage.set_visibility(owner, name, visibility)?;
                visibility
            }
            None => {
                self.require_read(actor, owner, name)?;
                self.storage.visibility(owner, name)?
            }
        };

        Ok(Response::Visibility {
            owner: owner.clone(),
            name: name.clone(),
            visibility,
        })
    }

    /// Copy a readable repository into the actor's storage
    pub fn fork(&self, actor: &Actor, owner: &UserName, name: &RepoName) -> Result<Response> {
        self.require_read(actor, owner, name)?;

        let fork = self.storage.fork(owner, name, &actor.name)?;
        Ok(Response::Forked {
            owner: actor.name.clone(),
            name: fork,
        })
    }

    /// Give a repository to another owner; only its owner or an admin may
    pub fn transfer(
        &self,
        actor: &Actor,
        owner: &UserName,
        name: &RepoName,
        new_owner: &UserName,
    ) -> Result<Response> {
        self.require_write(actor, owner, name)?;
        self.storage.transfer(owner, name, new_owner)?;

        Ok(Response::Transferred {
            owner: new_owner.clone(),
            name: name.clone(),
        })
    }

    /// Copy a readable repository into `destination`, outside the storage
    pub fn clone_repo(
        &self,
        actor: &Actor,
        owner: &UserName,
        name: &RepoName,
        destination: &Path,
    ) -> Result<Response> {
        self.require_read(actor, owner, name)?;
        self.storage.clone_repo(owner, name, destination)?;

        Ok(Response::Cloned {
            owner: owner.clone(),
            name: name.clone(),
            path: destination.to_path_buf(),
        })
    }

    fn require_write(&self, actor: &Actor, owner: &UserName, repo: &RepoName) -> Result<()> {
        if self.policy.can_write(owner, repo, actor) {
            Ok(())
        } else {
            Err(permission_denied(actor, owner, repo))
        }
    }

    fn require_read(&self, actor: &Actor, owner: &UserName, repo: &RepoName) -> Result<()> {
        if self.policy.can_read(owner, repo, actor) {
            Ok(())
        } else {
            Err(permission_denied(actor, owner, repo))
        }
    }
}

fn permission_denied(actor: &Actor, owner: &UserName, repo: &RepoName) -> RepositoryError {
    tracing::warn!(actor = %actor.name, %owner, %repo, "permission denied");
    RepositoryError::PermissionDenied {
        actor: actor.name.to_string(),
        owner: owner.to_string(),
        repo: repo.to_string(),
    }
}
