use common::{OWNER, TestRepo, actor, admin, branch, repo, repo_name, user};
use lbit::RepositoryError;
use lbit::areas::config::Visibility;
use lbit::commands::dispatch::Dispatcher;
use lbit::commands::request::Request;
use lbit::commands::response::Response;
use pretty_assertions::assert_eq;
use rstest::rstest;

mod common;

fn dispatcher(repo: &TestRepo) -> Dispatcher {
    Dispatcher::with_owner_policy(repo.storage.clone())
}

#[rstest]
fn owner_can_stage_and_commit(repo: TestRepo) {
    let dispatcher = dispatcher(&repo);
    let alice = actor(OWNER);
    repo.write("a.txt", "a");

    dispatcher
        .execute(&alice, &repo.owner(), &repo.name(), Request::Add { path: "a.txt".into() })
        .unwrap();
    let response = dispatcher
        .execute(
            &alice,
            &repo.owner(),
            &repo.name(),
            Request::Commit { message: "first".into() },
        )
        .unwrap();

    let Response::Committed(commit) = response else {
        panic!("expected a commit");
    };
    assert_eq!(commit.author(), OWNER);
    assert_eq!(
        repo.repository.branch_head(&branch("main")).unwrap(),
        Some(commit.id())
    );
}

#[rstest]
fn strangers_cannot_write_or_read_private_repositories(repo: TestRepo) {
    let dispatcher = dispatcher(&repo);
    let bob = actor("bob");
    repo.write("a.txt", "a");

    assert!(matches!(
        dispatcher.execute(&bob, &repo.owner(), &repo.name(), Request::Add { path: "a.txt".into() }),
        Err(RepositoryError::PermissionDenied { .. })
    ));
    assert!(matches!(
        dispatcher.execute(&bob, &repo.owner(), &repo.name(), Request::Status),
        Err(RepositoryError::PermissionDenied { .. })
    ));
    assert!(repo.repository.status().unwrap().is_empty());
}

#[rstest]
fn public_repositories_are_readable_but_not_writable(repo: TestRepo) {
    let dispatcher = dispatcher(&repo);
    let bob = actor("bob");
    dispatcher
        .visibility(&actor(OWNER), &repo.owner(), &repo.name(), Some(Visibility::Public))
        .unwrap();

    assert!(
        dispatcher
            .execute(&bob, &repo.owner(), &repo.name(), Request::ListBranches)
            .is_ok()
    );
    assert!(matches!(
        dispatcher.execute(
            &bob,
            &repo.owner(),
            &repo.name(),
            Request::CreateBranch { name: branch("dev") }
        ),
        Err(RepositoryError::PermissionDenied { .. })
    ));
}

#[rstest]
fn admins_may_write_anywhere(repo: TestRepo) {
    let dispatcher = dispatcher(&repo);

    dispatcher
        .execute(
            &admin("root"),
            &repo.owner(),
            &repo.name(),
            Request::CreateBranch { name: branch("dev") },
        )
        .unwrap();

    assert!(repo.repository.refs().branch_exists(&branch("dev")));
}

#[rstest]
fn unknown_repositories_are_not_found(repo: TestRepo) {
    let dispatcher = dispatcher(&repo);

    assert!(matches!(
        dispatcher.execute(&actor(OWNER), &repo.owner(), &repo_name("nope"), Request::Status),
        Err(RepositoryError::NotFound { kind: "repository", .. })
    ));
}

#[rstest]
fn push_and_pull_use_the_storage_mirror(repo: TestRepo) {
    let dispatcher = dispatcher(&repo);
    let alice = actor(OWNER);
    repo.commit_file("a.txt", "a", "first");

    dispatcher
        .execute(&alice, &repo.owner(), &repo.name(), Request::Push)
        .unwrap();

    assert!(
        repo.storage
            .remote_path(&repo.owner(), &repo.name())
            .join("workspace/a.txt")
            .is_file()
    );
    assert!(
        dispatcher
            .execute(&alice, &repo.owner(), &repo.name(), Request::Pull)
            .is_ok()
    );
}

#[rstest]
fn repository_management_is_permission_checked(repo: TestRepo) {
    let dispatcher = dispatcher(&repo);
    let bob = actor("bob");

    dispatcher.create_repo(&bob, &repo_name("mine")).unwrap();
    assert!(matches!(
        dispatcher.delete_repo(&bob, &repo.owner(), &repo.name()),
        Err(RepositoryError::PermissionDenied { .. })
    ));
    assert!(matches!(
        dispatcher.fork(&bob, &repo.owner(), &repo.name()),
        Err(RepositoryError::PermissionDenied { .. })
    ));

    let Response::Repos(visible) = dispatcher.list_repos(&bob, None).unwrap() else {
        panic!("expected a repository list");
    };
    assert_eq!(visible, vec![(user("bob"), repo_name("mine"))]);

    dispatcher.delete_repo(&admin("root"), &repo.owner(), &repo.name()).unwrap();
    assert!(!repo.storage.repo_exists(&repo.owner(), &repo.name()));
}

#[rstest]
fn strangers_cannot_tell_private_from_missing(repo: TestRepo) {
    let dispatcher = dispatcher(&repo);
    let bob = actor("bob");

    for name in [repo.name(), repo_name("nope")] {
        assert!(matches!(
            dispatcher.execute(&bob, &repo.owner(), &name, Request::Status),
            Err(RepositoryError::PermissionDenied { .. })
        ));
        assert!(matches!(
            dispatcher.visibility(&bob, &repo.owner(), &name, None),
            Err(RepositoryError::PermissionDenied { .. })
        ));
        assert!(matches!(
            dispatcher.fork(&bob, &repo.owner(), &name),
            Err(RepositoryError::PermissionDenied { .. })
        ));
    }
}

#[rstest]
fn reserved_owner_names_cannot_reach_mirrors(repo: TestRepo) {
    let dispatcher = dispatcher(&repo);
    let intruder = actor("_remotes");
    repo.commit_file("a.txt", "a", "first");
    dispatcher
        .execute(&actor(OWNER), &repo.owner(), &repo.name(), Request::Push)
        .unwrap();

    assert!(matches!(
        dispatcher.create_repo(&intruder, &repo_name(OWNER)),
        Err(RepositoryError::ReservedOwner(_))
    ));
    assert!(matches!(
        dispatcher.delete_repo(&intruder, &user("_remotes"), &repo_name(OWNER)),
        Err(RepositoryError::ReservedOwner(_))
    ));

    assert!(
        dispatcher
            .execute(&actor(OWNER), &repo.owner(), &repo.name(), Request::Pull)
            .is_ok()
    );
}

#[rstest]
fn only_owners_and_admins_transfer(repo: TestRepo) {
    let dispatcher = dispatcher(&repo);

    assert!(matches!(
        dispatcher.transfer(&actor("bob"), &repo.owner(), &repo.name(), &user("bob")),
        Err(RepositoryError::PermissionDenied { .. })
    ));

    let response = dispatcher
        .transfer(&actor(OWNER), &repo.owner(), &repo.name(), &user("carol"))
        .unwrap();
    assert_eq!(
        response,
        Response::Transferred {
            owner: user("carol"),
            name: repo.name(),
        }
    );
    assert!(repo.storage.repo_exists(&user("carol"), &repo.name()));

    dispatcher
        .transfer(&admin("root"), &user("carol"), &repo.name(), &user("dave"))
        .unwrap();
    assert!(repo.storage.repo_exists(&user("dave"), &repo.name()));
}

#[rstest]
fn clone_needs_read_access(repo: TestRepo) {
    let dispatcher = dispatcher(&repo);
    let target = assert_fs::TempDir::new().unwrap();
    let destination = target.path().join("copy");
    repo.commit_file("a.txt", "a", "first");

    assert!(matches!(
        dispatcher.clone_repo(&actor("bob"), &repo.owner(), &repo.name(), &destination),
        Err(RepositoryError::PermissionDenied { .. })
    ));
    assert!(!destination.exists());

    dispatcher
        .visibility(&actor(OWNER), &repo.owner(), &repo.name(), Some(Visibility::Public))
        .unwrap();
    dispatcher
        .clone_repo(&actor("bob"), &repo.owner(), &repo.name(), &destination)
        .unwrap();
    assert_eq!(
        std::fs::read_to_string(destination.join("workspace").join("a.txt")).unwrap(),
        "a"
    );
}

#[rstest]
fn ignore_patterns_need_write_access(repo: TestRepo) {
    let dispatcher = dispatcher(&repo);
    let alice = actor(OWNER);

    assert!(matches!(
        dispatcher.execute(
            &actor("bob"),
            &repo.owner(),
            &repo.name(),
            Request::Ignore { pattern: "*.log".into() }
        ),
        Err(RepositoryError::PermissionDenied { .. })
    ));

    for pattern in ["*.log", "  build/  "] {
        dispatcher
            .execute(&alice, &repo.owner(), &repo.name(), Request::Ignore { pattern: pattern.into() })
            .unwrap();
    }
    let response = dispatcher
        .execute(&alice, &repo.owner(), &repo.name(), Request::IgnorePatterns)
        .unwrap();

    assert_eq!(
        response,
        Response::IgnorePatterns(vec!["*.log".to_string(), "build/".to_string()])
    );
    assert!(matches!(
        repo.repository.add_ignore_pattern("a\nb"),
        Err(RepositoryError::InvalidMessage { field: "pattern" })
    ));
}
