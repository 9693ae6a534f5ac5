//! Repository configuration
//!
//! A `key=value` text file at the repository root. The engine reads and writes `name`,
//! `owner`, `visibility` and `created`; any other keys are kept as they are.

use crate::artifacts::core::atomic_file::write_atomically;
use crate::errors::{RepositoryError, Result};
use std::collections::BTreeMap;
use std::path::Path;

pub const NAME_KEY: &str = "name";
pub const OWNER_KEY: &str = "owner";
pub const VISIBILITY_KEY: &str = "visibility";
pub const CREATED_KEY: &str = "created";

/// Who may read a repository besides its owner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    Public,
    #[default]
    Private,
}

impl std::str::FromStr for Visibility {
    type Err = RepositoryError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "public" => Ok(Visibility::Public),
            "private" => Ok(Visibility::Private),
            other => Err(RepositoryError::InvalidVisibility(other.to_string())),
        }
    }
}

impl std::fmt::Display for Visibility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Visibility::Public => write!(f, "public"),
            Visibility::Private => write!(f, "private"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepoConfig {
    values: BTreeMap<String, String>,
}

impl RepoConfig {
    /// Read `path`; a missing file is an empty config
    pub fn load(path: &Path) -> Result<Self> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(err) => return Err(RepositoryError::io(path, err)),
        };

        let values = content
            .lines()
            .filter_map(|line| line.split_once('='))
            .map(|(key, value)| (key.trim().to_string(), value.trim().to_string()))
            .collect();

        Ok(RepoConfig { values })
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content: String = self
            .values
            .iter()
            .map(|(key, value)| format!("{key}={value}\n"))
            .collect();

        write_atomically(path, content.as_bytes())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn name(&self) -> Option<&str> {
        self.get(NAME_KEY)
    }

    pub fn owner(&self) -> Option<&str> {
        self.get(OWNER_KEY)
    }

    /// Missing or unrecognised values read as private
    pub fn visibility(&self) -> Visibility {
        self.get(VISIBILITY_KEY)
            .and_then(|value| value.parse().ok())
            .unwrap_or_default()
    }

    pub fn set_visibility(&mut self, visibility: Visibility) {
        self.set(VISIBILITY_KEY, visibility.to_string());
    }
}
