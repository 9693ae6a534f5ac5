//! Command implementations
//!
//! - `plumbing`: building blocks (blob hashing, commit writing)
//! - `porcelain`: user-facing operations, implemented on `Repository`
//! - `request` / `response`: the closed set of repository operations and their results
//! - `dispatch`: permission-checked execution of requests on behalf of an actor

pub mod dispatch;
pub mod plumbing;
pub mod porcelain;
pub mod request;
pub mod response;
