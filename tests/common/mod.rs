#![allow(dead_code)]

pub mod command;
pub mod file;

use assert_fs::TempDir;
use fake::Fake;
use fake::faker::lorem::en::Words;
use lbit::areas::access::{Actor, Role};
use lbit::areas::repository::Repository;
use lbit::areas::storage::Storage;
use lbit::artifacts::branch::branch_name::{BranchName, RepoName, UserName};
use lbit::artifacts::index::index_entry::IndexEntry;
use lbit::artifacts::objects::commit::Commit;
use rstest::fixture;

pub const OWNER: &str = "alice";
pub const REPO: &str = "demo";

pub fn user(name: &str) -> UserName {
    UserName::try_parse(name).expect("valid user name")
}

pub fn repo_name(name: &str) -> RepoName {
    RepoName::try_parse(name).expect("valid repository name")
}

pub fn branch(name: &str) -> BranchName {
    BranchName::try_parse(name).expect("valid branch name")
}

pub fn actor(name: &str) -> Actor {
    Actor::new(user(name), Role::User)
}

pub fn admin(name: &str) -> Actor {
    Actor::new(user(name), Role::Admin)
}

/// A few random words, for file contents nobody inspects
pub fn random_content() -> String {
    let words: Vec<String> = Words(3..8).fake();
    words.join(" ")
}

/// A repository created in a fresh storage directory
pub struct TestRepo {
    pub dir: TempDir,
    pub storage: Storage,
    pub repository: Repository,
}

impl TestRepo {
    pub fn owner(&self) -> UserName {
        user(OWNER)
    }

    pub fn name(&self) -> RepoName {
        repo_name(REPO)
    }

    pub fn write(&self, path: &str, content: &str) {
        file::write_file(file::FileSpec::new(
            self.repository.workspace().path().join(path),
            content.to_string(),
        ));
    }

    pub fn stage(&self, path: &str, content: &str) -> IndexEntry {
        self.write(path, content);
        self.repository.add(path).expect("failed to stage file")
    }

    pub fn commit_file(&self, path: &str, content: &str, message: &str) -> Commit {
        self.stage(path, content);
        self.repository
            .commit(OWNER, message)
            .expect("failed to commit")
    }
}

#[fixture]
pub fn storage_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

#[fixture]
pub fn repo(storage_dir: TempDir) -> TestRepo {
    let storage = Storage::new(storage_dir.path());
    let repository = storage
        .create_repo(&user(OWNER), &repo_name(REPO))
        .expect("failed to create repository");

    TestRepo {
        dir: storage_dir,
        storage,
        repository,
    }
}
