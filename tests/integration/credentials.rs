//! `auth login|logout|status` against the mock API and a temporary config file.

use super::test_utils::{command, context, viewer};
use linear_cli::cli::render_outcome;
use linear_cli::config::CredentialStore;
use linear_cli::render::OutputFormat;
use serde_json::{json, Value};
use std::fs;
use tempfile::TempDir;
use wiremock::matchers::{header, method};
use wiremock::{Mock, MockServer, ResponseTemplate};

const GOOD_KEY: &str = "lin_api_good";

async fn server_accepting(key: &str) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(header("Authorization", key))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": { "viewer": viewer() } })))
        .with_priority(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(json!({ "errors": [{ "message": "Authentication required" }] })),
        )
        .with_priority(2)
        .mount(&server)
        .await;
    server
}

async fn run(server: &MockServer, dir: &TempDir, args: &[&str]) -> (Value, bool) {
    let ctx = context(server, dir, None);
    let (text, ok) = render_outcome(ctx.execute(&command(args)).await, OutputFormat::Structured);
    (serde_json::from_str(&text).unwrap(), ok)
}

#[tokio::test]
async fn test_login_validates_then_stores_key() {
    let server = server_accepting(GOOD_KEY).await;
    let dir = TempDir::new().unwrap();

    let (value, ok) = run(&server, &dir, &["auth", "login", "--key", GOOD_KEY]).await;
    assert!(ok);
    assert_eq!(value["data"]["message"], "Successfully authenticated");
    assert_eq!(value["data"]["user"]["email"], "ada@example.com");

    let store = CredentialStore::with_env_key(dir.path().join("config.toml"), None);
    assert_eq!(store.get_api_key().unwrap().as_deref(), Some(GOOD_KEY));
}

#[tokio::test]
async fn test_login_with_rejected_key_stores_nothing() {
    let server = server_accepting(GOOD_KEY).await;
    let dir = TempDir::new().unwrap();

    let (value, ok) = run(&server, &dir, &["auth", "login", "--key", "lin_api_bad"]).await;
    assert!(!ok);
    assert_eq!(value["error"]["code"], "INVALID_API_KEY");
    assert!(!dir.path().join("config.toml").exists());
}

#[tokio::test]
async fn test_status_logout_cycle() {
    let server = server_accepting(GOOD_KEY).await;
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, format!("default_team_id = \"team-1\"\napi_key = \"{}\"\n", GOOD_KEY)).unwrap();

    let (value, ok) = run(&server, &dir, &["auth", "status"]).await;
    assert!(ok);
    assert_eq!(value["data"]["authenticated"], true);
    assert_eq!(value["data"]["source"], "config");

    let (value, ok) = run(&server, &dir, &["auth", "logout"]).await;
    assert!(ok);
    assert_eq!(value["data"]["message"], "Successfully logged out");
    let remaining = fs::read_to_string(&path).unwrap();
    assert!(remaining.contains("default_team_id"));
    assert!(!remaining.contains("api_key"));

    let (value, ok) = run(&server, &dir, &["auth", "status"]).await;
    assert!(ok);
    assert_eq!(value["data"]["authenticated"], false);

    let (value, ok) = run(&server, &dir, &["auth", "logout"]).await;
    assert!(!ok);
    assert_eq!(value["error"]["code"], "NOT_AUTHENTICATED");
}
