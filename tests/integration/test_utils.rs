//! Shared test utilities for integration tests
//!
//! A wiremock server stands in for the Linear GraphQL endpoint. Operations
//! are told apart by the operation name at the start of the query text.

use clap::Parser;
use linear_cli::api::GraphqlClient;
use linear_cli::cli::{Cli, Commands, RunContext};
use linear_cli::config::{ApiConfig, CredentialStore, LinearConfig};
use serde_json::{json, Value};
use tempfile::TempDir;
use wiremock::matchers::{body_string_contains, method};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const ISSUE_ID: &str = "0b6a1c9e-2f3d-4e5a-8b7c-9d0e1f2a3b4c";
pub const TEAM_ID: &str = "5f0c2a1b-3c4d-4e5f-a6b7-c8d9e0f1a2b3";

pub fn api_config(server: &MockServer) -> ApiConfig {
    ApiConfig {
        endpoint: server.uri(),
        connect_timeout_secs: 2,
        request_timeout_secs: 5,
    }
}

pub fn client(server: &MockServer) -> GraphqlClient {
    GraphqlClient::new("lin_api_test", &api_config(server)).unwrap()
}

/// Run context whose stored key lives in `dir` and whose API is `server`.
pub fn context(server: &MockServer, dir: &TempDir, key: Option<&str>) -> RunContext {
    let store = CredentialStore::with_env_key(
        dir.path().join("config.toml"),
        key.map(str::to_string),
    );
    let config = LinearConfig {
        api: api_config(server),
        ..LinearConfig::default()
    };
    RunContext::new(config, store)
}

pub fn command(args: &[&str]) -> Commands {
    let mut argv = vec!["linear"];
    argv.extend_from_slice(args);
    Cli::try_parse_from(argv).unwrap().command
}

/// Answer `operation` with `{"data": data}`.
pub async fn mount_data(server: &MockServer, operation: &str, data: Value) {
    mount_response(server, operation, 200, json!({ "data": data })).await;
}

/// Answer `operation` with an arbitrary status and body.
pub async fn mount_response(server: &MockServer, operation: &str, status: u16, body: Value) {
    Mock::given(method("POST"))
        .and(body_string_contains(operation))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .mount(server)
        .await;
}

pub fn page_info(has_next: bool, end_cursor: Option<&str>) -> Value {
    json!({
        "hasNextPage": has_next,
        "hasPreviousPage": false,
        "startCursor": "c0",
        "endCursor": end_cursor,
    })
}

pub fn viewer() -> Value {
    json!({
        "id": "u1",
        "name": "Ada Lovelace",
        "email": "ada@example.com",
        "displayName": "ada",
        "active": true,
        "admin": false,
        "timezone": "Europe/London",
        "createdAt": "2024-01-01T00:00:00.000Z",
        "organization": { "id": "o1", "name": "Analytical", "urlKey": "analytical" },
        "teams": { "nodes": [{ "id": TEAM_ID, "key": "ENG", "name": "Engineering" }] },
    })
}

pub fn issue(identifier: &str) -> Value {
    json!({
        "id": ISSUE_ID,
        "identifier": identifier,
        "title": "Fix login redirect",
        "description": "Users land on a blank page",
        "priority": 2.0,
        "priorityLabel": "High",
        "estimate": 3.0,
        "url": format!("https://linear.app/acme/issue/{}", identifier),
        "createdAt": "2024-03-01T10:00:00.000Z",
        "updatedAt": "2024-03-02T10:00:00.000Z",
        "state": { "id": "s1", "name": "In Progress", "color": "#f2c94c", "type": "started" },
        "assignee": { "id": "u1", "name": "Ada Lovelace", "email": "ada@example.com" },
        "team": { "id": TEAM_ID, "key": "ENG", "name": "Engineering" },
    })
}

/// Mocks for resolving `ENG-<number>` to [`ISSUE_ID`].
pub async fn mount_eng_team(server: &MockServer, identifier: &str) {
    mount_data(
        server,
        "query TeamsByKey(",
        json!({ "teams": { "nodes": [{ "id": TEAM_ID, "key": "ENG", "name": "Engineering" }] } }),
    )
    .await;
    mount_data(
        server,
        "query IssueByTeamAndNumber(",
        json!({ "issues": { "nodes": [{ "id": ISSUE_ID, "identifier": identifier }] } }),
    )
    .await;
}
