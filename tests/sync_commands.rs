use common::file::snapshot_dir;
use common::{OWNER, TestRepo, branch, random_content, repo, user};
use lbit::RepositoryError;
use pretty_assertions::assert_eq;
use rstest::rstest;

mod common;

#[rstest]
fn push_corrupt_pull_restores_the_mirror(repo: TestRepo) {
    repo.commit_file("a.txt", &random_content(), "first");
    repo.repository.create_branch(&branch("dev")).unwrap();
    repo.commit_file("docs/b.md", &random_content(), "second");
    let remote = repo.storage.remote_path(&repo.owner(), &repo.name());

    repo.repository.push(&remote).unwrap();
    let mirror = snapshot_dir(&remote);

    // Wreck the local workspace and refs
    std::fs::remove_dir_all(repo.repository.workspace().path()).unwrap();
    repo.write("junk.txt", "junk");
    std::fs::write(repo.repository.path().join("refs/heads/main"), "").unwrap();
    std::fs::remove_file(repo.repository.path().join("refs/heads/dev")).unwrap();

    repo.repository.pull(&remote).unwrap();

    assert_eq!(snapshot_dir(repo.repository.path()), mirror);
    assert_eq!(
        snapshot_dir(repo.repository.workspace().path()),
        snapshot_dir(&remote.join("workspace"))
    );
    assert!(!repo.repository.workspace().path().join("junk.txt").exists());
    assert_eq!(repo.repository.history(&branch("main"), 10).unwrap().len(), 2);
}

#[rstest]
fn push_replaces_the_previous_mirror(repo: TestRepo) {
    let remote = repo.storage.remote_path(&repo.owner(), &repo.name());
    std::fs::create_dir_all(&remote).unwrap();
    std::fs::write(remote.join("stale"), "left over").unwrap();
    repo.commit_file("a.txt", "a", "first");

    repo.repository.push(&remote).unwrap();

    assert!(!remote.join("stale").exists());
    assert_eq!(snapshot_dir(&remote), snapshot_dir(repo.repository.path()));
}

#[rstest]
fn pull_without_a_mirror_fails(repo: TestRepo) {
    let remote = repo.storage.remote_path(&repo.owner(), &repo.name());

    assert!(matches!(
        repo.repository.pull(&remote),
        Err(RepositoryError::RemoteNotFound(path)) if path == remote
    ));
}

#[rstest]
fn fork_copies_history_under_the_new_owner(repo: TestRepo) {
    let first = repo.commit_file("a.txt", "a", "first");

    let fork_name = repo
        .storage
        .fork(&user(OWNER), &repo.name(), &user("bob"))
        .unwrap();
    let fork = repo.storage.open_repo(&user("bob"), &fork_name).unwrap();

    assert_eq!(fork_name.as_ref(), "demo-fork");
    assert_eq!(fork.branch_head(&branch("main")).unwrap(), Some(first.id()));
    assert_eq!(
        std::fs::read(fork.workspace().path().join("a.txt")).unwrap(),
        b"a"
    );
    let config = fork.config().unwrap();
    assert_eq!(config.owner(), Some("bob"));
    assert_eq!(config.name(), Some("demo-fork"));
}
