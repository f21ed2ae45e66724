//! GraphQL transport against a mock endpoint, and how its failures classify.

use super::test_utils::{client, mount_data, mount_response, page_info, viewer, ISSUE_ID};
use linear_cli::api::{EntityLookup, LinearApi, PageRequest};
use linear_cli::classify::{classify, Failure, INVALID_API_KEY_MESSAGE, RATE_LIMITED_MESSAGE};
use linear_cli::error::{ErrorCode, TransportError};
use serde_json::json;
use wiremock::matchers::{header, method};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_viewer_sends_raw_key() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(header("Authorization", "lin_api_test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": { "viewer": viewer() } })))
        .expect(1)
        .mount(&server)
        .await;

    let viewer = client(&server).viewer().await.unwrap();
    assert_eq!(viewer.email, "ada@example.com");
    assert_eq!(viewer.teams.nodes[0].key, "ENG");
}

#[tokio::test]
async fn test_unauthorized_classifies_as_invalid_key() {
    let server = MockServer::start().await;
    mount_response(
        &server,
        "query Viewer",
        401,
        json!({ "errors": [{ "message": "Authentication required" }] }),
    )
    .await;

    let err = client(&server).viewer().await.unwrap_err();
    assert!(matches!(err, TransportError::Status { status: 401, .. }));
    let classified = classify(&Failure::from(err));
    assert_eq!(classified.code, ErrorCode::InvalidApiKey);
    assert_eq!(classified.message, INVALID_API_KEY_MESSAGE);
}

#[tokio::test]
async fn test_rate_limit_classifies() {
    let server = MockServer::start().await;
    mount_response(&server, "query Viewer", 429, json!({})).await;

    let err = client(&server).viewer().await.unwrap_err();
    let classified = classify(&Failure::from(err));
    assert_eq!(classified.code, ErrorCode::RateLimited);
    assert_eq!(classified.message, RATE_LIMITED_MESSAGE);
}

#[tokio::test]
async fn test_graphql_errors_keep_first_message() {
    let server = MockServer::start().await;
    mount_response(
        &server,
        "query Issue(",
        200,
        json!({
            "data": null,
            "errors": [{ "message": "Entity not found" }, { "message": "second" }],
        }),
    )
    .await;

    let err = client(&server).issue(ISSUE_ID).await.unwrap_err();
    match &err {
        TransportError::GraphQl { message, messages } => {
            assert_eq!(message, "Entity not found");
            assert_eq!(messages.len(), 2);
        }
        other => panic!("unexpected error: {:?}", other),
    }
    let classified = classify(&Failure::from(err));
    assert_eq!(classified.code, ErrorCode::NotFound);
    assert_eq!(classified.message, "Entity not found");
}

#[tokio::test]
async fn test_other_errors_are_api_errors_verbatim() {
    let server = MockServer::start().await;
    mount_response(
        &server,
        "query Viewer",
        200,
        json!({ "errors": [{ "message": "Argument Validation Error" }] }),
    )
    .await;

    let err = client(&server).viewer().await.unwrap_err();
    let classified = classify(&Failure::from(err));
    assert_eq!(classified.code, ErrorCode::ApiError);
    assert_eq!(classified.message, "Argument Validation Error");
}

#[tokio::test]
async fn test_missing_issue_is_none() {
    let server = MockServer::start().await;
    mount_data(&server, "query Issue(", json!({ "issue": null })).await;
    assert_eq!(client(&server).issue(ISSUE_ID).await.unwrap(), None);
}

#[tokio::test]
async fn test_connection_threads_page_info() {
    let server = MockServer::start().await;
    mount_data(
        &server,
        "query Users(",
        json!({
            "users": {
                "nodes": [{
                    "id": "u1",
                    "name": "Ada Lovelace",
                    "displayName": "ada",
                    "email": "ada@example.com",
                    "active": true,
                    "admin": false,
                    "createdAt": "2024-01-01T00:00:00.000Z",
                }],
                "pageInfo": page_info(true, Some("cursor-1")),
            }
        }),
    )
    .await;

    let users = client(&server)
        .users(None, &PageRequest::new(1, None))
        .await
        .unwrap();
    assert_eq!(users.nodes.len(), 1);
    assert!(users.page_info.has_next_page);
    assert_eq!(users.page_info.next_cursor(), Some("cursor-1"));
}

#[tokio::test]
async fn test_team_lookup_by_key() {
    let server = MockServer::start().await;
    mount_data(&server, "query TeamsByKey(", json!({ "teams": { "nodes": [] } })).await;
    assert!(client(&server).find_teams_by_key("NOPE").await.unwrap().is_empty());
}
