//! Commit object
//!
//! Commits are immutable snapshots. Each one records:
//! - The author (a user name, or `merge` for merge commits)
//! - A local timestamp with second precision
//! - The branch it was made on
//! - Its single parent, or none for the first commit on a branch
//! - A single-line message
//! - The complete list of staged files, in index order
//!
//! ## Format
//!
//! On disk:
//! ```text
//! id=<sha256 of everything below>
//! author=<author>
//! timestamp=<YYYY-MM-DDTHH:MM:SS>
//! branch=<branch>
//! parent=<id|null>
//! message=<message>
//! files:
//! <path>\t<blob id>
//! ```

use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::index::index_entry::IndexEntry;
use crate::artifacts::objects::object::{Object, Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{RepositoryError, Result};
use bytes::Bytes;
use chrono::Timelike;
use std::io::BufRead;

/// Format of commit and log timestamps
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

const ID_PREFIX: &str = "id=";
const FILES_MARKER: &str = "files:";
const NULL_PARENT: &str = "null";

/// Local wall-clock time truncated to whole seconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(chrono::NaiveDateTime);

impl Timestamp {
    pub fn now() -> Self {
        let now = chrono::Local::now().naive_local();
        Self(now.with_nanosecond(0).unwrap_or(now))
    }

    pub fn try_parse(value: &str) -> Result<Self> {
        chrono::NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT)
            .map(Self)
            .map_err(|_| RepositoryError::Corrupt(format!("invalid timestamp '{value}'")))
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format(TIMESTAMP_FORMAT))
    }
}

/// Commit object
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    parent: Option<ObjectId>,
    author: String,
    timestamp: Timestamp,
    branch: BranchName,
    message: String,
    files: Vec<IndexEntry>,
}

impl Commit {
    pub fn new(
        parent: Option<ObjectId>,
        author: String,
        timestamp: Timestamp,
        branch: BranchName,
        message: String,
        files: Vec<IndexEntry>,
    ) -> Self {
        Commit {
            parent,
            author,
            timestamp,
            branch,
            message,
            files,
        }
    }

    /// Reject values that would break the line-oriented format
    pub fn check_single_line(field: &'static str, value: &str) -> Result<()> {
        if value.contains(['\n', '\r']) {
            Err(RepositoryError::InvalidMessage { field })
        } else {
            Ok(())
        }
    }

    pub fn id(&self) -> ObjectId {
        self.object_id()
    }

    pub fn parent(&self) -> Option<&ObjectId> {
        self.parent.as_ref()
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    pub fn branch(&self) -> &BranchName {
        &self.branch
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn files(&self) -> &[IndexEntry] {
        &self.files
    }

    fn body(&self) -> String {
        let mut lines = vec![
            format!("author={}", self.author),
            format!("timestamp={}", self.timestamp),
            format!("branch={}", self.branch),
            format!(
                "parent={}",
                self.parent.as_ref().map_or(NULL_PARENT, |p| p.as_ref())
            ),
            format!("message={}", self.message),
            FILES_MARKER.to_string(),
        ];
        lines.extend(self.files.iter().map(IndexEntry::to_line));

        let mut body = lines.join("\n");
        body.push('\n');
        body
    }
}

impl Packable for Commit {
    fn serialize(&self) -> Bytes {
        let body = self.body();
        let id = ObjectId::digest(body.as_bytes());

        Bytes::from(format!("{ID_PREFIX}{id}\n{body}"))
    }
}

impl Unpackable for Commit {
    fn deserialize(mut reader: impl BufRead) -> Result<Self> {
        let mut content = String::new();
        reader
            .read_to_string(&mut content)
            .map_err(|err| RepositoryError::Corrupt(format!("unreadable commit: {err}")))?;

        let mut lines = content.lines();
        let stored_id = lines
            .next()
            .and_then(|line| line.strip_prefix(ID_PREFIX))
            .ok_or_else(|| RepositoryError::Corrupt("commit is missing its id line".into()))?;
        let stored_id = ObjectId::try_parse(stored_id)?;

        let mut field = |key: &str| -> Result<String> {
            lines
                .next()
                .and_then(|line| line.strip_prefix(key))
                .and_then(|rest| rest.strip_prefix('='))
                .map(str::to_string)
                .ok_or_else(|| RepositoryError::Corrupt(format!("commit is missing '{key}'")))
        };

        let author = field("author")?;
        let timestamp = Timestamp::try_parse(&field("timestamp")?)?;
        let branch = BranchName::try_parse(field("branch")?)?;
        let parent = match field("parent")?.as_str() {
            NULL_PARENT | "" => None,
            parent => Some(ObjectId::try_parse(parent)?),
        };
        let message = field("message")?;

        if lines.next() != Some(FILES_MARKER) {
            return Err(RepositoryError::Corrupt(
                "commit is missing its files section".into(),
            ));
        }

        let files = lines
            .filter(|line| !line.is_empty())
            .map(IndexEntry::parse_line)
            .collect::<Result<Vec<_>>>()?;

        let commit = Commit::new(parent, author, timestamp, branch, message, files);
        if commit.id() != stored_id {
            return Err(RepositoryError::Corrupt(format!(
                "commit {stored_id} does not match its content"
            )));
        }

        Ok(commit)
    }
}

impl Object for Commit {
    fn content(&self) -> Bytes {
        Bytes::from(self.body())
    }

    fn display(&self) -> String {
        let mut lines = vec![
            format!("commit {}", self.id()),
            format!("Author: {}", self.author),
            format!("Date:   {}", self.timestamp),
            format!("Branch: {}", self.branch),
        ];
        if let Some(parent) = &self.parent {
            lines.push(format!("Parent: {parent}"));
        }
        lines.push(String::new());
        lines.push(format!("    {}", self.message));
        lines.push(String::new());
        lines.extend(self.files.iter().map(|entry| format!("  {}", entry.path)));

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};
    use std::io::Cursor;

    fn at(value: &str) -> Timestamp {
        Timestamp::try_parse(value).unwrap()
    }

    #[fixture]
    fn commit() -> Commit {
        Commit::new(
            Some(ObjectId::digest(b"parent")),
            "alice".to_string(),
            at("2024-03-01T10:15:30"),
            BranchName::try_parse("main").unwrap(),
            "Add greeting".to_string(),
            vec![
                IndexEntry::new("a.txt".to_string(), ObjectId::digest(b"a")),
                IndexEntry::new("src/b.txt".to_string(), ObjectId::digest(b"b")),
            ],
        )
    }

    #[rstest]
    fn identical_fields_give_identical_ids(commit: Commit) {
        assert_eq!(commit.clone().id(), commit.id());
    }

    #[rstest]
    #[case::author(|c: &mut Commit| c.author = "bob".to_string())]
    #[case::timestamp(|c: &mut Commit| c.timestamp = at("2024-03-01T10:15:31"))]
    #[case::branch(|c: &mut Commit| c.branch = BranchName::try_parse("dev").unwrap())]
    #[case::parent(|c: &mut Commit| c.parent = None)]
    #[case::message(|c: &mut Commit| c.message = "Add farewell".to_string())]
    #[case::file_order(|c: &mut Commit| c.files.reverse())]
    #[case::file_blob(|c: &mut Commit| c.files[0].oid = ObjectId::digest(b"changed"))]
    fn changing_any_field_changes_the_id(commit: Commit, #[case] change: fn(&mut Commit)) {
        let mut changed = commit.clone();
        change(&mut changed);

        assert_ne!(changed.id(), commit.id());
    }

    #[rstest]
    fn stored_form_is_id_line_then_hashed_body(commit: Commit) {
        let stored = String::from_utf8(commit.serialize().to_vec()).unwrap();
        let body = String::from_utf8(commit.content().to_vec()).unwrap();

        assert_eq!(stored, format!("id={}\n{}", commit.id(), body));
        assert_eq!(
            body,
            format!(
                "author=alice\ntimestamp=2024-03-01T10:15:30\nbranch=main\nparent={}\n\
                 message=Add greeting\nfiles:\na.txt\t{}\nsrc/b.txt\t{}\n",
                ObjectId::digest(b"parent"),
                ObjectId::digest(b"a"),
                ObjectId::digest(b"b"),
            )
        );
    }

    #[rstest]
    fn reads_back_what_it_writes(commit: Commit) {
        let parsed = Commit::deserialize(Cursor::new(commit.serialize())).unwrap();

        assert_eq!(parsed, commit);
    }

    #[test]
    fn root_commit_records_null_parent() {
        let root = Commit::new(
            None,
            "alice".to_string(),
            at("2024-03-01T10:15:30"),
            BranchName::default_branch(),
            "first".to_string(),
            vec![],
        );
        let body = String::from_utf8(root.content().to_vec()).unwrap();

        assert!(body.contains("parent=null\n"));
        assert_eq!(
            Commit::deserialize(Cursor::new(root.serialize()))
                .unwrap()
                .parent(),
            None
        );
    }

    #[rstest]
    fn tampered_content_is_detected(commit: Commit) {
        let stored = String::from_utf8(commit.serialize().to_vec()).unwrap();
        let tampered = stored.replace("author=alice", "author=mallory");

        assert!(matches!(
            Commit::deserialize(Cursor::new(tampered)),
            Err(RepositoryError::Corrupt(_))
        ));
    }

    #[test]
    fn multi_line_messages_are_rejected() {
        assert!(Commit::check_single_line("message", "one line").is_ok());
        assert!(matches!(
            Commit::check_single_line("message", "two\nlines"),
            Err(RepositoryError::InvalidMessage { field: "message" })
        ));
    }
}
