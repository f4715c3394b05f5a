//! End-to-end tests driving the `kotak` binary against a mock trade API.

use std::path::Path;
use std::process::{Command, Output};

use serde_json::{Value, json};
use tempfile::TempDir;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn kotak(args: Vec<String>) -> Output {
    tokio::task::spawn_blocking(move || {
        Command::new(env!("CARGO_BIN_EXE_kotak"))
            .args(&args)
            .env_remove("RUST_LOG")
            .env_remove("KOTAK_SESSION_FILE")
            .output()
            .expect("failed to run kotak")
    })
    .await
    .unwrap()
}

fn session_args(session: &Path, rest: &[&str]) -> Vec<String> {
    let mut args: Vec<String> = rest.iter().map(|s| s.to_string()).collect();
    args.push("--session-file".to_string());
    args.push(session.display().to_string());
    args
}

async fn mount_handshake(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/session/1.0/session/init"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(server)
        .await;
    Mock::given(method("POST"))
        .and(path("/session/1.0/session/login/userid"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"oneTimeToken": "T1"})))
        .mount(server)
        .await;
    Mock::given(method("POST"))
        .and(path("/session/1.0/session/2FA/accesscode"))
        .and(header("onetimetoken", "T1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"sessionToken": "S1"})))
        .mount(server)
        .await;
}

fn login_args(server: &MockServer, session: &Path) -> Vec<String> {
    let uri = server.uri();
    session_args(
        session,
        &[
            "login",
            "--user-id",
            "AB1234",
            "--password",
            "pw",
            "--app-id",
            "app-1",
            "--consumer-key",
            "ck-1",
            "--secret-key",
            "sk-1",
            "--access-code",
            "4321",
            "--base-url",
            uri.as_str(),
        ],
    )
}

#[tokio::test(flavor = "multi_thread")]
async fn test_login_then_positions_reuses_session() {
    let server = MockServer::start().await;
    mount_handshake(&server).await;
    Mock::given(method("GET"))
        .and(path("/positions/1.0/positions/open"))
        .and(header("consumerkey", "ck-1"))
        .and(header("sessiontoken", "S1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"Success": []})))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let session = dir.path().join("session.json");

    let login = kotak(login_args(&server, &session)).await;
    assert!(login.status.success(), "{}", String::from_utf8_lossy(&login.stderr));
    assert!(session.exists());

    let positions = kotak(session_args(&session, &["--compact", "positions", "open"])).await;
    assert!(positions.status.success(), "{}", String::from_utf8_lossy(&positions.stderr));

    let printed: Value = serde_json::from_slice(&positions.stdout).unwrap();
    assert_eq!(printed, json!({"Success": []}));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_failed_login_leaves_no_session() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/session/1.0/session/init"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let session = dir.path().join("session.json");

    let login = kotak(login_args(&server, &session)).await;
    assert!(!login.status.success());
    assert!(!session.exists());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_command_without_session_fails() {
    let dir = TempDir::new().unwrap();
    let session = dir.path().join("session.json");

    let out = kotak(session_args(&session, &["report", "orders"])).await;

    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("kotak login"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_logout_removes_session() {
    let server = MockServer::start().await;
    mount_handshake(&server).await;

    let dir = TempDir::new().unwrap();
    let session = dir.path().join("session.json");

    assert!(kotak(login_args(&server, &session)).await.status.success());
    let out = kotak(session_args(&session, &["logout"])).await;

    assert!(out.status.success());
    assert!(!session.exists());
}
