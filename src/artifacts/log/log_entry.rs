use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::commit::{Commit, Timestamp};
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{RepositoryError, Result};
use colored::Colorize;
use derive_new::new;

/// One line of the commit log: `<id>\t<branch>\t<timestamp>\t<message>`
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct LogEntry {
    pub oid: ObjectId,
    pub branch: BranchName,
    pub timestamp: Timestamp,
    pub message: String,
}

impl LogEntry {
    pub fn parse_line(line: &str) -> Result<Self> {
        let mut fields = line.splitn(4, '\t');
        let mut next = |name: &str| {
            fields
                .next()
                .ok_or_else(|| RepositoryError::Corrupt(format!("log line is missing {name}")))
        };

        let oid = ObjectId::try_parse(next("id")?)?;
        let branch = BranchName::try_parse(next("branch")?)?;
        let timestamp = Timestamp::try_parse(next("timestamp")?)?;
        let message = next("message")?.to_string();

        Ok(Self::new(oid, branch, timestamp, message))
    }

    pub fn to_line(&self) -> String {
        format!(
            "{}\t{}\t{}\t{}",
            self.oid, self.branch, self.timestamp, self.message
        )
    }
}

impl From<&Commit> for LogEntry {
    fn from(commit: &Commit) -> Self {
        LogEntry::new(
            commit.id(),
            commit.branch().clone(),
            commit.timestamp(),
            commit.message().to_string(),
        )
    }
}

impl std::fmt::Display for LogEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} ({}) {}",
            self.oid.to_short_oid().yellow(),
            self.timestamp,
            self.branch.as_ref().green(),
            self.message
        )
    }
}
