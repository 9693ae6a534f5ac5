//! Names of branches, tags, repositories and users
//!
//! All four share one rule: non-empty, made only of ASCII letters, digits, `.`, `_` and
//! `-`. Names are validated when they are constructed, so a value of any of these types is
//! always safe to use as a file name under `refs/` or the storage root.

pub mod branch_name;

pub const IDENTIFIER_REGEX: &str = r"^[A-Za-z0-9._-]+$";

/// Branch every new repository starts on
pub const DEFAULT_BRANCH: &str = "main";
