use crate::artifacts::index::ENTRY_SEPARATOR;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{RepositoryError, Result};
use derive_new::new;

/// A staged file: its repository-relative path and the blob holding its content
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct IndexEntry {
    pub path: String,
    pub oid: ObjectId,
}

impl IndexEntry {
    /// Validate a repository-relative path
    ///
    /// Paths use `/` as separator and may not be absolute, contain empty, `.` or `..`
    /// components, or contain characters that would break the line format.
    pub fn check_path(raw: &str) -> Result<String> {
        let invalid = |reason| RepositoryError::InvalidPath {
            path: raw.to_string(),
            reason,
        };

        if raw.is_empty() {
            return Err(invalid("path is empty"));
        }
        if raw.contains(['\t', '\n', '\r', '\\']) {
            return Err(invalid("path contains a tab, newline or backslash"));
        }
        if raw.starts_with('/') {
            return Err(invalid("path must be relative to the workspace"));
        }
        if raw
            .split('/')
            .any(|component| component.is_empty() || component == "." || component == "..")
        {
            return Err(invalid("path may not contain empty, '.' or '..' components"));
        }

        Ok(raw.to_string())
    }

    /// Parse one `<path>\t<id>` line
    pub fn parse_line(line: &str) -> Result<Self> {
        let (path, oid) = line
            .split_once(ENTRY_SEPARATOR)
            .ok_or_else(|| RepositoryError::Corrupt(format!("malformed entry line '{line}'")))?;

        Ok(Self::new(path.to_string(), ObjectId::try_parse(oid)?))
    }

    pub fn to_line(&self) -> String {
        format!("{}{}{}", self.path, ENTRY_SEPARATOR, self.oid)
    }
}
