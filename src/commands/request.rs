use crate::artifacts::branch::branch_name::{BranchName, TagName};
use crate::artifacts::objects::object_id::ObjectId;

/// Default number of commits shown by `Log` and `Journal`
pub const DEFAULT_LOG_LIMIT: usize = 20;

/// Every operation that runs against a single repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Add { path: String },
    Reset { path: String },
    Remove { path: String },
    Status,
    Ignore { pattern: String },
    IgnorePatterns,
    Commit { message: String },
    /// History of `branch`, or of the current branch
    Log { branch: Option<BranchName>, limit: usize },
    Journal { limit: usize },
    Show { oid: String },
    Revert { oid: ObjectId },
    CreateBranch { name: BranchName },
    ListBranches,
    RenameBranch { old: BranchName, new: BranchName },
    DeleteBranch { name: BranchName },
    Switch { name: BranchName },
    SwitchOrCreate { name: BranchName },
    Merge { source: BranchName },
    Rebase { target: BranchName },
    CreateTag { name: TagName },
    ListTags,
    Push,
    Pull,
}

impl Request {
    /// Whether the request changes repository state (and so needs write access)
    pub fn is_mutating(&self) -> bool {
        !matches!(
            self,
            Request::Status
                | Request::IgnorePatterns
                | Request::Log { .. }
                | Request::Journal { .. }
                | Request::Show { .. }
                | Request::ListBranches
                | Request::ListTags
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Request::Status, false)]
    #[case(Request::ListTags, false)]
    #[case(Request::Journal { limit: 5 }, false)]
    #[case(Request::IgnorePatterns, false)]
    #[case(Request::Ignore { pattern: "*.tmp".into() }, true)]
    #[case(Request::Push, true)]
    #[case(Request::Pull, true)]
    #[case(Request::Commit { message: "m".into() }, true)]
    #[case(Request::Switch { name: BranchName::default_branch() }, true)]
    fn classifies_requests(#[case] request: Request, #[case] mutating: bool) {
        assert_eq!(request.is_mutating(), mutating);
    }
}
