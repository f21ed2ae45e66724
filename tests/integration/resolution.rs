//! Issue reference resolution through the GraphQL client.

use super::test_utils::{client, mount_data, mount_eng_team, ISSUE_ID, TEAM_ID};
use linear_cli::classify::{classify, Failure};
use linear_cli::error::ErrorCode;
use linear_cli::identifier::{IdentifierResolver, ResolveError};
use serde_json::json;
use wiremock::matchers::{any, body_string_contains, method};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_opaque_id_makes_no_requests() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let api = client(&server);
    let resolved = IdentifierResolver::new(&api).resolve(ISSUE_ID).await.unwrap();
    assert_eq!(resolved.as_str(), ISSUE_ID);
}

#[tokio::test]
async fn test_compound_key_resolves_in_two_lookups() {
    let server = MockServer::start().await;
    mount_eng_team(&server, "ENG-42").await;

    let api = client(&server);
    let resolved = IdentifierResolver::new(&api).resolve("ENG-42").await.unwrap();
    assert_eq!(resolved.as_str(), ISSUE_ID);

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
}

#[tokio::test]
async fn test_team_key_is_uppercased_before_lookup() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_string_contains("query TeamsByKey("))
        .and(body_string_contains("\"key\":\"ENG\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "teams": { "nodes": [{ "id": TEAM_ID, "key": "ENG", "name": "Engineering" }] } }
        })))
        .expect(1)
        .mount(&server)
        .await;
    mount_data(
        &server,
        "query IssueByTeamAndNumber(",
        json!({ "issues": { "nodes": [{ "id": ISSUE_ID, "identifier": "ENG-7" }] } }),
    )
    .await;

    let api = client(&server);
    let resolved = IdentifierResolver::new(&api).resolve("eng-7").await.unwrap();
    assert_eq!(resolved.as_str(), ISSUE_ID);
}

#[tokio::test]
async fn test_unknown_team_is_not_found() {
    let server = MockServer::start().await;
    mount_data(&server, "query TeamsByKey(", json!({ "teams": { "nodes": [] } })).await;

    let api = client(&server);
    let err = IdentifierResolver::new(&api).resolve("ABC-1").await.unwrap_err();
    assert!(matches!(err, ResolveError::TeamNotFound(ref key) if key == "ABC"));

    let classified = classify(&Failure::from(err));
    assert_eq!(classified.code, ErrorCode::NotFound);
    assert_eq!(classified.message, "Team with key \"ABC\" not found");
}

#[tokio::test]
async fn test_unknown_issue_number_is_not_found() {
    let server = MockServer::start().await;
    mount_data(
        &server,
        "query TeamsByKey(",
        json!({ "teams": { "nodes": [{ "id": TEAM_ID, "key": "ENG", "name": "Engineering" }] } }),
    )
    .await;
    mount_data(&server, "query IssueByTeamAndNumber(", json!({ "issues": { "nodes": [] } })).await;

    let api = client(&server);
    let err = IdentifierResolver::new(&api).resolve("ENG-999").await.unwrap_err();
    let classified = classify(&Failure::from(err));
    assert_eq!(classified.code, ErrorCode::NotFound);
    assert_eq!(classified.message, "Issue ENG-999 not found");
}

#[tokio::test]
async fn test_malformed_reference_is_invalid_input() {
    let server = MockServer::start().await;
    let api = client(&server);
    for reference in ["ENG", "ENG-", "ENG-007", "12-34", "not an id"] {
        let err = IdentifierResolver::new(&api).resolve(reference).await.unwrap_err();
        let classified = classify(&Failure::from(err));
        assert_eq!(classified.code, ErrorCode::InvalidInput, "{}", reference);
    }
    assert!(server.received_requests().await.unwrap().is_empty());
}
