use crate::artifacts::branch::{DEFAULT_BRANCH, IDENTIFIER_REGEX};
use crate::errors::{RepositoryError, Result};
use std::sync::LazyLock;

static IDENTIFIER: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(IDENTIFIER_REGEX).expect("identifier regex is valid"));

/// Check a name against the identifier rule.
///
/// `.` and `..` pass the character rule but name directories, so they are rejected too.
pub fn is_valid_identifier(name: &str) -> bool {
    IDENTIFIER.is_match(name) && name != "." && name != ".."
}

macro_rules! identifier {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(String);

        impl $name {
            pub fn try_parse(name: impl Into<String>) -> Result<Self> {
                let name = name.into();

                if is_valid_identifier(&name) {
                    Ok(Self(name))
                } else {
                    Err(RepositoryError::InvalidIdentifier(name))
                }
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = RepositoryError;

            fn from_str(s: &str) -> Result<Self> {
                Self::try_parse(s)
            }
        }
    };
}

identifier!(
    /// Name of a branch under `refs/heads/`
    BranchName
);
identifier!(
    /// Name of a tag under `refs/tags/`
    TagName
);
identifier!(
    /// Name of a repository under its owner's storage directory
    RepoName
);
identifier!(
    /// Name of a repository owner or acting user
    UserName
);

impl BranchName {
    pub fn default_branch() -> Self {
        Self(DEFAULT_BRANCH.to_string())
    }

    pub fn is_default_branch(&self) -> bool {
        self.0 == DEFAULT_BRANCH
    }
}
