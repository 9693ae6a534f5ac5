//! Append-only commit log
//!
//! Every commit made in the repository (regular, merge or revert) appends one line, giving a
//! chronological listing across branches without walking the object graph. Rebases and pulls
//! do not append.

use crate::artifacts::log::log_entry::LogEntry;
use crate::errors::{IoResultExt, RepositoryError, Result};
use std::io::Write;
use std::path::Path;

#[derive(Debug)]
pub struct CommitLog {
    path: Box<Path>,
}

impl CommitLog {
    pub fn new(path: Box<Path>) -> Self {
        CommitLog { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(&self, entry: &LogEntry) -> Result<()> {
        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .at_path(&self.path)?;

        writeln!(file, "{}", entry.to_line()).at_path(&self.path)
    }

    /// All records, oldest first
    pub fn entries(&self) -> Result<Vec<LogEntry>> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(RepositoryError::io(&self.path, err)),
        };

        content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(LogEntry::parse_line)
            .collect()
    }

    /// The `limit` most recent records, newest first
    pub fn recent(&self, limit: usize) -> Result<Vec<LogEntry>> {
        Ok(self.entries()?.into_iter().rev().take(limit).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::branch::branch_name::BranchName;
    use crate::artifacts::objects::commit::Timestamp;
    use crate::artifacts::objects::object_id::ObjectId;
    use pretty_assertions::assert_eq;

    fn entry(message: &str) -> LogEntry {
        LogEntry::new(
            ObjectId::digest(message.as_bytes()),
            BranchName::default_branch(),
            Timestamp::now(),
            message.to_string(),
        )
    }

    #[test]
    fn recent_lists_newest_first() {
        let dir = tempfile::tempdir().unwrap();
        let log = CommitLog::new(dir.path().join("log").into_boxed_path());

        for message in ["one", "two", "three"] {
            log.append(&entry(message)).unwrap();
        }

        let messages: Vec<String> = log
            .recent(2)
            .unwrap()
            .into_iter()
            .map(|entry| entry.message)
            .collect();
        assert_eq!(messages, vec!["three", "two"]);
        assert_eq!(log.entries().unwrap().len(), 3);
    }

    #[test]
    fn missing_log_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let log = CommitLog::new(dir.path().join("log").into_boxed_path());

        assert!(log.recent(10).unwrap().is_empty());
    }
}
