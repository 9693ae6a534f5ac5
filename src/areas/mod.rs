//! Repository areas
//!
//! The stateful parts of a repository root and of the storage holding many of them:
//!
//! - `database`: content-addressed objects under `objects/`
//! - `refs`: HEAD, branch heads and tags
//! - `index`: the staging area
//! - `workspace`: user files under `workspace/`
//! - `commit_log`: chronological record of commits
//! - `config`: per-repository `key=value` settings
//! - `repository`: handle tying the areas of one root together
//! - `storage`: repositories and mirrors keyed by owner and name
//! - `access`: actors and the policy deciding what they may do

pub mod access;
pub mod commit_log;
pub mod config;
pub mod database;
pub mod index;
pub mod refs;
pub mod repository;
pub mod storage;
pub mod workspace;
