//! Results of dispatched requests
//!
//! The `Display` impl of [`Response`] is the text the CLI prints.

use crate::areas::config::Visibility;
use crate::artifacts::branch::branch_name::{BranchName, RepoName, TagName, UserName};
use crate::artifacts::index::index_entry::IndexEntry;
use crate::artifacts::log::log_entry::LogEntry;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use colored::Colorize;
use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    Staged(IndexEntry),
    Unstaged(IndexEntry),
    Removed(IndexEntry),
    Status {
        branch: BranchName,
        entries: Vec<IndexEntry>,
    },
    Ignored(String),
    IgnorePatterns(Vec<String>),
    Committed(Commit),
    History(Vec<Commit>),
    Journal(Vec<LogEntry>),
    Commit(Commit),
    Reverted(Commit),
    BranchCreated {
        name: BranchName,
        head: Option<ObjectId>,
    },
    Branches {
        current: BranchName,
        branches: Vec<(BranchName, Option<ObjectId>)>,
    },
    BranchRenamed {
        old: BranchName,
        new: BranchName,
    },
    BranchDeleted(BranchName),
    Switched {
        branch: BranchName,
        existed: bool,
    },
    Merged(Commit),
    Rebased {
        branch: BranchName,
        head: ObjectId,
    },
    TagCreated {
        name: TagName,
        oid: ObjectId,
    },
    Tags(Vec<(TagName, ObjectId)>),
    Pushed {
        files: u64,
    },
    Pulled {
        files: u64,
    },
    RepoCreated {
        owner: UserName,
        name: RepoName,
    },
    RepoDeleted {
        owner: UserName,
        name: RepoName,
    },
    Repos(Vec<(UserName, RepoName)>),
    Visibility {
        owner: UserName,
        name: RepoName,
        visibility: Visibility,
    },
    Forked {
        owner: UserName,
        name: RepoName,
    },
    Transferred {
        owner: UserName,
        name: RepoName,
    },
    Cloned {
        owner: UserName,
        name: RepoName,
        path: PathBuf,
    },
}

fn short(oid: &ObjectId) -> colored::ColoredString {
    oid.to_short_oid().yellow()
}

fn one_line(commit: &Commit) -> String {
    format!("{} {}", short(&commit.id()), commit.message())
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Response::Staged(entry) => write!(f, "staged {}", entry.path.green()),
            Response::Unstaged(entry) => write!(f, "unstaged {}", entry.path),
            Response::Removed(entry) => write!(f, "removed {}", entry.path.red()),
            Response::Status { branch, entries } => {
                write!(f, "On branch {}", branch.as_ref().green())?;
                if entries.is_empty() {
                    return write!(f, "\nnothing staged");
                }
                write!(f, "\nChanges to be committed:")?;
                for entry in entries {
                    write!(f, "\n  {} {}", entry.path.green(), short(&entry.oid))?;
                }
                Ok(())
            }
            Response::Ignored(pattern) => write!(f, "ignoring {pattern}"),
            Response::IgnorePatterns(patterns) => write!(f, "{}", patterns.join("\n")),
            Response::Committed(commit) => write!(
                f,
                "[{} {}] {}",
                commit.branch(),
                short(&commit.id()),
                commit.message()
            ),
            Response::History(commits) => {
                if commits.is_empty() {
                    return write!(f, "no commits");
                }
                let lines: Vec<String> = commits
                    .iter()
                    .map(|commit| {
                        format!(
                            "{} {} {} {}",
                            short(&commit.id()),
                            commit.timestamp(),
                            commit.author().cyan(),
                            commit.message()
                        )
                    })
                    .collect();
                write!(f, "{}", lines.join("\n"))
            }
            Response::Journal(entries) => {
                if entries.is_empty() {
                    return write!(f, "no commits");
                }
                let lines: Vec<String> = entries.iter().map(ToString::to_string).collect();
                write!(f, "{}", lines.join("\n"))
            }
            Response::Commit(commit) => write!(f, "{}", commit.display()),
            Response::Reverted(commit) => write!(f, "reverted: {}", one_line(commit)),
            Response::BranchCreated { name, head } => match head {
                Some(head) => write!(f, "created branch {} at {}", name.as_ref().green(), short(head)),
                None => write!(f, "created branch {}", name.as_ref().green()),
            },
            Response::Branches { current, branches } => {
                let lines: Vec<String> = branches
                    .iter()
                    .map(|(branch, head)| {
                        let head = head
                            .as_ref()
                            .map_or_else(|| "(no commits)".dimmed(), short);
                        if branch == current {
                            format!("* {} {}", branch.as_ref().green(), head)
                        } else {
                            format!("  {} {}", branch, head)
                        }
                    })
                    .collect();
                write!(f, "{}", lines.join("\n"))
            }
            Response::BranchRenamed { old, new } => write!(f, "renamed branch {old} to {new}"),
            Response::BranchDeleted(name) => write!(f, "deleted branch {name}"),
            Response::Switched { branch, existed } => {
                if *existed {
                    write!(f, "switched to branch {}", branch.as_ref().green())
                } else {
                    write!(f, "switched to new branch {}", branch.as_ref().green())
                }
            }
            Response::Merged(commit) => write!(f, "{}", one_line(commit)),
            Response::Rebased { branch, head } => {
                write!(f, "{} now at {}", branch.as_ref().green(), short(head))
            }
            Response::TagCreated { name, oid } => write!(f, "tagged {} as {}", short(oid), name),
            Response::Tags(tags) => {
                let lines: Vec<String> = tags
                    .iter()
                    .map(|(name, oid)| format!("{} {}", name, short(oid)))
                    .collect();
                write!(f, "{}", lines.join("\n"))
            }
            Response::Pushed { files } => write!(f, "pushed {files} files"),
            Response::Pulled { files } => write!(f, "pulled {files} files"),
            Response::RepoCreated { owner, name } => write!(f, "created repository {owner}/{name}"),
            Response::RepoDeleted { owner, name } => write!(f, "deleted repository {owner}/{name}"),
            Response::Repos(repos) => {
                let lines: Vec<String> = repos
                    .iter()
                    .map(|(owner, name)| format!("{owner}/{name}"))
                    .collect();
                write!(f, "{}", lines.join("\n"))
            }
            Response::Visibility {
                owner,
                name,
                visibility,
            } => write!(f, "{owner}/{name} is {visibility}"),
            Response::Forked { owner, name } => write!(f, "forked to {owner}/{name}"),
            Response::Transferred { owner, name } => write!(f, "transferred to {owner}/{name}"),
            Response::Cloned { owner, name, path } => {
                write!(f, "cloned {owner}/{name} into {}", path.display())
            }
        }
    }
}
