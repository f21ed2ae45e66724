//! End-to-end command routes: parse, execute against the mock API, render.

use super::test_utils::{
    command, context, issue, mount_data, mount_eng_team, mount_response, page_info, viewer,
    ISSUE_ID, TEAM_ID,
};
use linear_cli::cli::render_outcome;
use linear_cli::render::{colors, OutputFormat};
use serde_json::{json, Value};
use tempfile::TempDir;
use wiremock::MockServer;

async fn run(server: &MockServer, args: &[&str], format: OutputFormat) -> (String, bool) {
    colors::disable();
    let dir = TempDir::new().unwrap();
    let ctx = context(server, &dir, Some("lin_api_test"));
    let outcome = ctx.execute(&command(args)).await;
    render_outcome(outcome, format)
}

async fn run_json(server: &MockServer, args: &[&str]) -> (Value, bool) {
    let (text, ok) = run(server, args, OutputFormat::Structured).await;
    (serde_json::from_str(&text).unwrap(), ok)
}

async fn mount_issue_list(server: &MockServer) {
    mount_data(
        server,
        "query Issues(",
        json!({
            "issues": {
                "nodes": [issue("ENG-1"), issue("ENG-2")],
                "pageInfo": page_info(true, Some("cursor-2")),
            }
        }),
    )
    .await;
}

#[tokio::test]
async fn test_me_structured() {
    let server = MockServer::start().await;
    mount_data(&server, "query Viewer", json!({ "viewer": viewer() })).await;

    let (value, ok) = run_json(&server, &["me"]).await;
    assert!(ok);
    assert_eq!(value["success"], true);
    assert_eq!(value["data"]["email"], "ada@example.com");
    assert_eq!(value["data"]["organization"]["urlKey"], "analytical");
    assert_eq!(value["data"]["teams"][0]["key"], "ENG");
}

#[tokio::test]
async fn test_me_minimal_prints_email() {
    let server = MockServer::start().await;
    mount_data(&server, "query Viewer", json!({ "viewer": viewer() })).await;

    let (text, ok) = run(&server, &["whoami"], OutputFormat::Minimal).await;
    assert!(ok);
    assert_eq!(text, "ada@example.com");
}

#[tokio::test]
async fn test_issue_list_threads_pagination() {
    let server = MockServer::start().await;
    mount_issue_list(&server).await;

    let (value, ok) = run_json(&server, &["issues", "list", "--team", "ENG"]).await;
    assert!(ok);
    assert_eq!(value["data"].as_array().unwrap().len(), 2);
    assert_eq!(value["data"][1]["identifier"], "ENG-2");
    assert_eq!(value["pageInfo"]["hasNextPage"], true);
    assert_eq!(value["pageInfo"]["endCursor"], "cursor-2");
}

#[tokio::test]
async fn test_issue_list_table_and_plain() {
    let server = MockServer::start().await;
    mount_issue_list(&server).await;

    let (table, ok) = run(&server, &["issues", "list"], OutputFormat::Tabular).await;
    assert!(ok);
    assert!(table.contains("ENG-1"));
    assert!(table.contains("Fix login redirect"));
    assert!(table.ends_with("More results available. Use --after cursor-2"));

    let (plain, _) = run(&server, &["issues", "list"], OutputFormat::Minimal).await;
    assert_eq!(plain, "ENG-1\nENG-2");
}

#[tokio::test]
async fn test_issue_list_rejects_bad_filter_json() {
    let server = MockServer::start().await;
    let (value, ok) = run_json(&server, &["issues", "list", "--filter", "{oops"]).await;
    assert!(!ok);
    assert_eq!(value["error"]["code"], "INVALID_INPUT");
    assert_eq!(value["error"]["message"], "Invalid JSON in --filter flag");
}

#[tokio::test]
async fn test_issue_get_by_identifier() {
    let server = MockServer::start().await;
    mount_eng_team(&server, "ENG-42").await;
    mount_data(&server, "query Issue(", json!({ "issue": issue("ENG-42") })).await;
    mount_data(
        &server,
        "query IssueLabels(",
        json!({ "issue": { "labels": { "nodes": [
            { "id": "l1", "name": "bug", "color": "#ff0000" },
        ] } } }),
    )
    .await;
    mount_data(
        &server,
        "query IssueComments(",
        json!({ "issue": { "comments": {
            "nodes": [
                { "id": "c1", "body": "first", "createdAt": "2024-03-01T11:00:00.000Z" },
                { "id": "c2", "body": "second", "createdAt": "2024-03-01T12:00:00.000Z" },
            ],
            "pageInfo": page_info(false, None),
        } } }),
    )
    .await;

    let (value, ok) = run_json(&server, &["issues", "get", "ENG-42"]).await;
    assert!(ok);
    assert_eq!(value["data"]["id"], ISSUE_ID);
    assert_eq!(value["data"]["state"]["name"], "In Progress");
    assert_eq!(value["data"]["team"]["id"], TEAM_ID);
    assert_eq!(value["data"]["labels"][0]["name"], "bug");
    assert_eq!(value["data"]["commentsCount"], 2);

    let (table, _) = run(&server, &["issues", "get", "ENG-42"], OutputFormat::Tabular).await;
    assert!(table.contains("In Progress"));
    assert!(table.contains("bug"));
}

#[tokio::test]
async fn test_issue_get_missing_is_not_found() {
    let server = MockServer::start().await;
    mount_data(&server, "query Issue(", json!({ "issue": null })).await;
    mount_data(&server, "query IssueLabels(", json!({ "issue": null })).await;
    mount_data(
        &server,
        "query IssueComments(",
        json!({ "issue": { "comments": { "nodes": [], "pageInfo": page_info(false, None) } } }),
    )
    .await;

    let (value, ok) = run_json(&server, &["issues", "get", ISSUE_ID]).await;
    assert!(!ok);
    assert_eq!(value["success"], false);
    assert_eq!(value["error"]["code"], "NOT_FOUND");
    assert_eq!(value["error"]["message"], format!("Issue {} not found", ISSUE_ID));
}

#[tokio::test]
async fn test_issue_update_without_fields() {
    let server = MockServer::start().await;
    let (value, ok) = run_json(&server, &["issues", "update", ISSUE_ID]).await;
    assert!(!ok);
    assert_eq!(value["error"]["code"], "INVALID_INPUT");
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_issue_delete_archives() {
    let server = MockServer::start().await;
    mount_data(&server, "query Issue(", json!({ "issue": issue("ENG-5") })).await;
    mount_data(
        &server,
        "mutation IssueArchive(",
        json!({ "issueArchive": { "success": true } }),
    )
    .await;

    let (value, ok) = run_json(&server, &["issues", "delete", ISSUE_ID]).await;
    assert!(ok);
    assert_eq!(value["data"]["deleted"], true);
    assert_eq!(value["data"]["permanent"], false);
    assert_eq!(value["data"]["message"], "Issue ENG-5 moved to trash");
}

#[tokio::test]
async fn test_document_delete_failure_is_api_error() {
    let server = MockServer::start().await;
    mount_data(
        &server,
        "mutation DocumentDelete(",
        json!({ "documentDelete": { "success": false } }),
    )
    .await;

    let (value, ok) = run_json(&server, &["documents", "delete", "doc-1"]).await;
    assert!(!ok);
    assert_eq!(value["error"]["code"], "API_ERROR");
    assert_eq!(value["error"]["message"], "Failed to delete document");
}

#[tokio::test]
async fn test_states_are_sorted_by_team_and_type() {
    let server = MockServer::start().await;
    let team = json!({ "id": TEAM_ID, "key": "ENG", "name": "Engineering" });
    mount_data(
        &server,
        "query WorkflowStates(",
        json!({ "workflowStates": {
            "nodes": [
                { "id": "s3", "name": "Done", "color": "#0f0", "type": "completed", "position": 0.0, "team": team },
                { "id": "s2", "name": "In Progress", "color": "#ff0", "type": "started", "position": 1.0, "team": team },
                { "id": "s1", "name": "Backlog", "color": "#999", "type": "backlog", "position": 0.0, "team": team },
            ],
            "pageInfo": page_info(false, None),
        } }),
    )
    .await;

    let (value, ok) = run_json(&server, &["states", "list"]).await;
    assert!(ok);
    let names: Vec<&str> = value["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Backlog", "In Progress", "Done"]);
}

#[tokio::test]
async fn test_search_unknown_errors_keep_message() {
    let server = MockServer::start().await;
    mount_response(
        &server,
        "query SearchIssues(",
        500,
        json!({ "errors": [{ "message": "Internal server error" }] }),
    )
    .await;

    let (value, ok) = run_json(&server, &["search", "login"]).await;
    assert!(!ok);
    assert_eq!(value["error"]["code"], "API_ERROR");
    assert_eq!(
        value["error"]["message"],
        "Request failed with status 500: Internal server error"
    );
}

#[tokio::test]
async fn test_missing_key_is_not_authenticated() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let ctx = context(&server, &dir, None);
    let (text, ok) = render_outcome(ctx.execute(&command(&["me"])).await, OutputFormat::Structured);
    let value: Value = serde_json::from_str(&text).unwrap();
    assert!(!ok);
    assert_eq!(value["error"]["code"], "NOT_AUTHENTICATED");
}
