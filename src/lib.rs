//! A local, file-backed version-control engine
//!
//! The crate is organised the same way the on-disk repository is:
//!
//! - `areas`: the stateful parts of a repository root (object database, refs, index,
//!   workspace, commit log, config) plus the storage root that holds many repositories
//! - `artifacts`: the values those areas store and exchange (objects, names, index entries,
//!   log records) and the policies applied to them (merge, rebase, mirroring)
//! - `commands`: the operations, implemented on `Repository`, and the request dispatcher
//!   that checks permissions before running them

pub mod areas;
pub mod artifacts;
pub mod commands;
pub mod errors;

pub use errors::{RepositoryError, Result};
