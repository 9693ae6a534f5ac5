//! Who may do what
//!
//! Operations run on behalf of an [`Actor`]. Whether the actor may write to, or read from, a
//! repository is decided by an [`AccessPolicy`]; [`OwnerPolicy`] lets owners and admins
//! write and lets anyone read public repositories.

use crate::areas::config::Visibility;
use crate::areas::storage::Storage;
use crate::artifacts::branch::branch_name::{RepoName, UserName};
use derive_new::new;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Role {
    Admin,
    #[default]
    User,
}

/// Identity an operation runs as
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct Actor {
    pub name: UserName,
    pub role: Role,
}

impl Actor {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

pub trait AccessPolicy {
    fn can_write(&self, owner: &UserName, repo: &RepoName, actor: &Actor) -> bool;

    fn is_public(&self, owner: &UserName, repo: &RepoName) -> bool;

    fn can_read(&self, owner: &UserName, repo: &RepoName, actor: &Actor) -> bool {
        self.is_public(owner, repo) || self.can_write(owner, repo, actor)
    }
}

/// Owners and admins write; public repositories are readable by everyone
#[derive(Debug, Clone, new)]
pub struct OwnerPolicy {
    storage: Storage,
}

impl AccessPolicy for OwnerPolicy {
    fn can_write(&self, owner: &UserName, _repo: &RepoName, actor: &Actor) -> bool {
        actor.is_admin() || &actor.name == owner
    }

    fn is_public(&self, owner: &UserName, repo: &RepoName) -> bool {
        match self.storage.visibility(owner, repo) {
            Ok(visibility) => visibility == Visibility::Public,
            Err(err) => {
                tracing::debug!(%owner, %repo, %err, "treating repository as private");
                false
            }
        }
    }
}
