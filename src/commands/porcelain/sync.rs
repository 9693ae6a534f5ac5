use crate::areas::repository::Repository;
use crate::artifacts::sync::mirror::{MIRRORED_ENTRIES, remove_entry, replace_entry};
use crate::errors::{IoResultExt, RepositoryError, Result};
use std::path::Path;

impl Repository {
    /// Replace the mirror at `remote` with a copy of this repository
    pub fn push(&self, remote: &Path) -> Result<u64> {
        remove_entry(remote)?;
        std::fs::create_dir_all(remote).at_path(remote)?;

        let mut copied = 0;
        for entry in MIRRORED_ENTRIES {
            copied += replace_entry(&self.path().join(entry), &remote.join(entry))?;
        }

        tracing::info!(remote = %remote.display(), files = copied, "pushed");
        Ok(copied)
    }

    /// Replace local state with the mirror at `remote`
    ///
    /// Each entry present in the mirror replaces the local one wholesale; local changes are
    /// discarded without any check.
    pub fn pull(&self, remote: &Path) -> Result<u64> {
        if !remote.is_dir() {
            return Err(RepositoryError::RemoteNotFound(remote.to_path_buf()));
        }

        std::fs::create_dir_all(self.path()).at_path(self.path())?;
        let mut copied = 0;
        for entry in MIRRORED_ENTRIES {
            copied += replace_entry(&remote.join(entry), &self.path().join(entry))?;
        }

        tracing::info!(remote = %remote.display(), files = copied, "pulled");
        Ok(copied)
    }
}
