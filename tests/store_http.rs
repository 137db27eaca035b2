// End-to-end store behavior against a mock GitHub API and an on-disk snapshot.

use gitpeek::cache::{FileSnapshotStore, MemorySnapshotStore, Snapshot, repo_key};
use gitpeek::github::GitHubClient;
use gitpeek::{GitPeekError, Store};
use serde_json::json;
use tempfile::TempDir;

fn client(server: &mockito::Server) -> GitHubClient {
    GitHubClient::new(&server.url(), None).unwrap()
}

#[tokio::test]
async fn test_octocat_scenario_survives_restart() {
    let mut server = mockito::Server::new_async().await;
    let repos_mock = server
        .mock("GET", "/users/octocat/repos")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!([{ "name": "Hello-World" }]).to_string())
        .expect(1)
        .create_async()
        .await;
    let branches_mock = server
        .mock("GET", "/repos/octocat/Hello-World/branches")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!([{ "name": "master" }]).to_string())
        .expect(1)
        .create_async()
        .await;

    let temp_dir = TempDir::new().unwrap();
    let snapshot_path = temp_dir.path().join("snapshot.json");

    let mut store = Store::new(client(&server), FileSnapshotStore::new(&snapshot_path));
    let repos = store.fetch_user_repositories("octocat").await.unwrap();
    assert_eq!(repos.len(), 1);
    assert_eq!(repos[0].name(), "Hello-World");

    let branches = store
        .fetch_repository_branches("octocat", "Hello-World")
        .await
        .unwrap();
    assert_eq!(branches.len(), 1);
    assert_eq!(branches[0].name(), "master");

    let on_disk: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&snapshot_path).unwrap()).unwrap();
    assert_eq!(
        on_disk,
        json!({
            "users": { "octocat": [{ "name": "Hello-World" }] },
            "repositories": { "octocat/Hello-World": [{ "name": "master" }] }
        })
    );

    // Restart: cache hits must not reach the server again.
    let mut restarted = Store::new(client(&server), FileSnapshotStore::new(&snapshot_path));
    assert!(restarted.is_user_cached("octocat"));
    assert!(restarted.is_repository_cached("octocat", "Hello-World"));
    assert_eq!(restarted.repositories("octocat"), store.repositories("octocat"));
    assert_eq!(
        restarted.branches("octocat", "Hello-World"),
        store.branches("octocat", "Hello-World")
    );
    restarted.ensure_repositories("octocat").await.unwrap();
    restarted
        .ensure_branches("octocat", "Hello-World")
        .await
        .unwrap();

    repos_mock.assert_async().await;
    branches_mock.assert_async().await;
}

#[tokio::test]
async fn test_failed_fetch_keeps_snapshot() {
    let mut server = mockito::Server::new_async().await;
    let _ok = server
        .mock("GET", "/users/octocat/repos")
        .with_status(200)
        .with_body(json!([{ "name": "Hello-World" }]).to_string())
        .expect(1)
        .create_async()
        .await;

    let temp_dir = TempDir::new().unwrap();
    let snapshot_path = temp_dir.path().join("snapshot.json");
    let mut store = Store::new(client(&server), FileSnapshotStore::new(&snapshot_path));
    store.fetch_user_repositories("octocat").await.unwrap();
    let before = std::fs::read_to_string(&snapshot_path).unwrap();

    server.reset_async().await;
    let _down = server
        .mock("GET", "/users/octocat/repos")
        .with_status(500)
        .with_body("oops")
        .create_async()
        .await;

    let err = store.fetch_user_repositories("octocat").await.unwrap_err();
    assert!(matches!(err, GitPeekError::Http { .. }));
    assert_eq!(store.repositories("octocat").len(), 1);
    assert_eq!(std::fs::read_to_string(&snapshot_path).unwrap(), before);
}

#[tokio::test]
async fn test_refetch_replaces_not_appends() {
    let mut server = mockito::Server::new_async().await;
    let _first = server
        .mock("GET", "/users/octocat/repos")
        .with_status(200)
        .with_body(json!([{ "name": "A" }]).to_string())
        .create_async()
        .await;

    let mut store = Store::new(client(&server), MemorySnapshotStore::new());
    store.fetch_user_repositories("octocat").await.unwrap();

    server.reset_async().await;
    let _second = server
        .mock("GET", "/users/octocat/repos")
        .with_status(200)
        .with_body(json!([{ "name": "B" }]).to_string())
        .create_async()
        .await;
    store.fetch_user_repositories("octocat").await.unwrap();

    let names: Vec<&str> = store
        .repositories("octocat")
        .iter()
        .map(|repo| repo.name())
        .collect();
    assert_eq!(names, ["B"]);
}

#[tokio::test]
async fn test_seeded_snapshot_answers_without_network() {
    let mut snapshot = Snapshot::default();
    snapshot.repositories.insert(
        repo_key("alice", "repo1"),
        vec![serde_json::from_value(json!({ "name": "main" })).unwrap()],
    );

    // No mocks registered: any request would fail.
    let server = mockito::Server::new_async().await;
    let mut store = Store::new(client(&server), MemorySnapshotStore::with_snapshot(snapshot));

    assert!(store.is_repository_cached("alice", "repo1"));
    assert!(!store.is_repository_cached("alice", "repo2"));
    let branches = store.ensure_branches("alice", "repo1").await.unwrap();
    assert_eq!(branches[0].name(), "main");
    assert!(store.ensure_branches("alice", "repo2").await.is_err());
    assert!(!store.is_repository_cached("alice", "repo2"));
}

#[tokio::test]
async fn test_stored_records_equal_response_body() {
    let body = json!([{
        "name": "Hello-World",
        "description": null,
        "language": null,
        "owner": { "login": "octocat", "type": "Enterprise" }
    }]);
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/users/octocat/repos")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body.to_string())
        .create_async()
        .await;

    let temp_dir = TempDir::new().unwrap();
    let snapshot_path = temp_dir.path().join("snapshot.json");
    let mut store = Store::new(client(&server), FileSnapshotStore::new(&snapshot_path));

    let stored = store.fetch_user_repositories("octocat").await.unwrap();
    assert_eq!(serde_json::to_value(stored).unwrap(), body);

    let on_disk: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&snapshot_path).unwrap()).unwrap();
    assert_eq!(on_disk["users"]["octocat"], body);
}

#[tokio::test]
async fn test_query_like_username_never_reaches_server() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", mockito::Matcher::Any)
        .with_status(200)
        .with_body(json!([{ "name": "Hello-World" }]).to_string())
        .expect(0)
        .create_async()
        .await;

    let mut store = Store::new(client(&server), MemorySnapshotStore::new());

    for username in ["octocat?x=", "octocat#top", "..", "octocat%2Frepos"] {
        assert!(store.fetch_user_repositories(username).await.is_err());
        assert!(!store.is_user_cached(username));
    }
    mock.assert_async().await;
}
