//! CLI integration tests against a mock identity service.

mod common;

use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{TestHome, run_cli, run_cli_failure, run_cli_success};

async fn mount_login(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/api/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "t1",
            "username": "alice"
        })))
        .mount(server)
        .await;
}

fn login(home: &TestHome, service: &str) {
    run_cli_success(
        &["login", "--username", "alice", "--password", "secret"],
        &home.session_file,
        service,
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_login_persists_session() {
    let server = MockServer::start().await;
    mount_login(&server).await;
    let home = TestHome::new();

    let stdout = run_cli_success(
        &["login", "--username", "alice", "--password", "secret"],
        &home.session_file,
        &server.uri(),
    );
    assert!(stdout.contains("Logged in successfully"));
    assert!(stdout.contains("alice"));

    let stored = home.stored().unwrap();
    assert_eq!(stored["token"], "t1");
    assert!(stored["user"].as_str().unwrap().contains("alice"));

    let status = run_cli_success(&["status"], &home.session_file, &server.uri());
    assert!(status.contains("authenticated"));
    assert!(!status.contains("not authenticated"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_login_failure_shows_service_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "msg": "Invalid credentials"
        })))
        .mount(&server)
        .await;

    let home = TestHome::new();
    let stderr = run_cli_failure(
        &["login", "--username", "alice", "--password", "wrong"],
        &home.session_file,
        &server.uri(),
    );

    assert!(stderr.contains("Invalid credentials"));
    assert!(home.stored().is_none_or(|s| s.get("token").is_none()));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_whoami_refreshes_profile() {
    let server = MockServer::start().await;
    mount_login(&server).await;

    Mock::given(method("GET"))
        .and(path("/api/me"))
        .and(header("authorization", "Bearer t1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "username": "alice",
            "id": "6543a1f0c2"
        })))
        .mount(&server)
        .await;

    let home = TestHome::new();
    login(&home, &server.uri());

    let stdout = run_cli_success(&["whoami", "--json"], &home.session_file, &server.uri());
    let profile: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(profile["username"], "alice");
    assert_eq!(profile["id"], "6543a1f0c2");

    let stored = home.stored().unwrap();
    assert!(stored["user"].as_str().unwrap().contains("6543a1f0c2"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_whoami_without_session() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/me"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let home = TestHome::new();
    let stderr = run_cli_failure(&["whoami"], &home.session_file, &server.uri());
    assert!(stderr.contains("No active session"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_whoami_rejected_token_clears_session() {
    let server = MockServer::start().await;
    mount_login(&server).await;

    Mock::given(method("GET"))
        .and(path("/api/me"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "msg": "Token has expired"
        })))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/logout"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let home = TestHome::new();
    login(&home, &server.uri());

    let stderr = run_cli_failure(&["whoami"], &home.session_file, &server.uri());
    assert!(stderr.contains("no longer valid"));

    let stored = home.stored().unwrap();
    assert!(stored.get("token").is_none());
    assert!(stored.get("user").is_none());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_whoami_server_error_keeps_session() {
    let server = MockServer::start().await;
    mount_login(&server).await;

    Mock::given(method("GET"))
        .and(path("/api/me"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "msg": "Failed to get user info"
        })))
        .mount(&server)
        .await;

    let home = TestHome::new();
    login(&home, &server.uri());

    let output = run_cli(&["whoami"], &home.session_file, &server.uri());
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("alice"));

    assert_eq!(home.stored().unwrap()["token"], "t1");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_logout_clears_even_when_service_fails() {
    let server = MockServer::start().await;
    mount_login(&server).await;

    Mock::given(method("POST"))
        .and(path("/api/logout"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let home = TestHome::new();
    login(&home, &server.uri());

    let stdout = run_cli_success(&["logout"], &home.session_file, &server.uri());
    assert!(stdout.contains("Logged out"));

    let stored = home.stored().unwrap();
    assert!(stored.get("token").is_none());

    let status = run_cli_success(&["status"], &home.session_file, &server.uri());
    assert!(status.contains("not authenticated"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_status_json_reports_corrupt_user_as_absent() {
    let home = TestHome::new();
    std::fs::write(
        &home.session_file,
        r#"{"token": "t1", "user": "{not json"}"#,
    )
    .unwrap();

    let stdout = run_cli_success(
        &["status", "--json"],
        &home.session_file,
        "http://127.0.0.1:9",
    );
    let status: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(status["authenticated"], true);
    assert!(status["user"].is_null());

    let stored = home.stored().unwrap();
    assert_eq!(stored["token"], "t1");
    assert!(stored.get("user").is_none());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_register() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/register"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "msg": "User registered successfully"
        })))
        .mount(&server)
        .await;

    let home = TestHome::new();
    let stdout = run_cli_success(
        &["register", "--username", "bob", "--password", "hunter2"],
        &home.session_file,
        &server.uri(),
    );
    assert!(stdout.contains("User registered successfully"));
    assert!(home.stored().is_none());
}

#[test]
fn test_rejects_non_https_remote_service() {
    let home = TestHome::new();
    let stderr = run_cli_failure(
        &["login", "--username", "alice", "--password", "secret"],
        &home.session_file,
        "http://auth.example.com",
    );
    assert!(stderr.contains("Invalid service URL"));
}

fn write_session(home: &TestHome) {
    std::fs::write(
        &home.session_file,
        r#"{"token": "t1", "user": "{\"username\":\"alice\"}"}"#,
    )
    .unwrap();
}

#[test]
fn test_logout_with_invalid_service_clears_session() {
    let home = TestHome::new();
    write_session(&home);

    let output = run_cli(&["logout"], &home.session_file, "http://auth.example.com");
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("Logged out"));
    assert!(String::from_utf8_lossy(&output.stderr).contains("clearing the local session only"));

    let stored = home.stored().unwrap();
    assert!(stored.get("token").is_none());
    assert!(stored.get("user").is_none());

    let status = run_cli_success(&["status"], &home.session_file, "http://auth.example.com");
    assert!(status.contains("not authenticated"));
}

#[test]
fn test_status_with_invalid_service_reads_session() {
    let home = TestHome::new();
    write_session(&home);

    let stdout = run_cli_success(
        &["status", "--json"],
        &home.session_file,
        "http://auth.example.com",
    );
    let status: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(status["authenticated"], true);
    assert_eq!(status["user"]["username"], "alice");
}
