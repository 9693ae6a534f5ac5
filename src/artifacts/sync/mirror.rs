use crate::errors::{IoResultExt, RepositoryError, Result};
use std::path::Path;
use walkdir::WalkDir;

/// Entries of a repository root that make up a mirror
pub const MIRRORED_ENTRIES: [&str; 8] = [
    "objects",
    "refs",
    "HEAD",
    "index",
    "log",
    "config",
    "workspace",
    ".lbitignore",
];

/// Replace `to` with a deep copy of `from`
///
/// Does nothing when `from` does not exist. Otherwise any existing file or directory at `to`
/// is removed first, so files that only exist on the destination side disappear. Returns the
/// number of files copied.
pub fn replace_entry(from: &Path, to: &Path) -> Result<u64> {
    if !from.exists() {
        return Ok(0);
    }

    remove_entry(to)?;

    if from.is_dir() {
        copy_tree(from, to)
    } else {
        if let Some(parent) = to.parent() {
            std::fs::create_dir_all(parent).at_path(parent)?;
        }
        std::fs::copy(from, to).at_path(to)?;
        Ok(1)
    }
}

/// Remove a file or a whole directory if it exists
pub fn remove_entry(path: &Path) -> Result<()> {
    match std::fs::symlink_metadata(path) {
        Ok(metadata) if metadata.is_dir() => std::fs::remove_dir_all(path).at_path(path),
        Ok(_) => std::fs::remove_file(path).at_path(path),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(err) => Err(RepositoryError::io(path, err)),
    }
}

/// Recursively copy directories and regular files from `from` into `to`
///
/// Symlinks are skipped.
pub fn copy_tree(from: &Path, to: &Path) -> Result<u64> {
    std::fs::create_dir_all(to).at_path(to)?;
    let mut copied = 0;

    for entry in WalkDir::new(from).min_depth(1) {
        let entry = entry.map_err(|err| {
            let path = err.path().unwrap_or(from).to_path_buf();
            RepositoryError::io(path, err.into())
        })?;
        let relative = entry
            .path()
            .strip_prefix(from)
            .map_err(|_| RepositoryError::Corrupt(format!("{:?} escaped {:?}", entry.path(), from)))?;
        let target = to.join(relative);

        if entry.file_type().is_dir() {
            std::fs::create_dir_all(&target).at_path(&target)?;
        } else if entry.file_type().is_file() {
            if let Some(parent) = target.parent() {
                std::fs::create_dir_all(parent).at_path(parent)?;
            }
            std::fs::copy(entry.path(), &target).at_path(&target)?;
            copied += 1;
        }
    }

    Ok(copied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn copy_tree_copies_nested_files() {
        let from = tempfile::tempdir().unwrap();
        let to = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(from.path().join("a/b")).unwrap();
        std::fs::write(from.path().join("top.txt"), "top").unwrap();
        std::fs::write(from.path().join("a/b/deep.txt"), "deep").unwrap();

        let copied = copy_tree(from.path(), &to.path().join("copy")).unwrap();

        assert_eq!(copied, 2);
        assert_eq!(
            std::fs::read_to_string(to.path().join("copy/a/b/deep.txt")).unwrap(),
            "deep"
        );
    }

    #[test]
    fn replace_entry_drops_files_missing_from_the_source() {
        let from = tempfile::tempdir().unwrap();
        let to = tempfile::tempdir().unwrap();
        std::fs::write(from.path().join("kept.txt"), "kept").unwrap();
        std::fs::write(to.path().join("stale.txt"), "stale").unwrap();

        replace_entry(from.path(), to.path()).unwrap();

        assert!(to.path().join("kept.txt").exists());
        assert!(!to.path().join("stale.txt").exists());
    }

    #[test]
    fn replace_entry_ignores_missing_sources() {
        let to = tempfile::tempdir().unwrap();
        std::fs::write(to.path().join("local.txt"), "local").unwrap();

        let copied = replace_entry(&to.path().join("absent"), &to.path().join("local.txt")).unwrap();

        assert_eq!(copied, 0);
        assert!(to.path().join("local.txt").exists());
    }
}
