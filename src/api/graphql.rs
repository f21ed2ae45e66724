//! Production [`LinearApi`] adapter over Linear's GraphQL endpoint.
//!
//! Every operation is one POST of `{query, variables}` with the raw API key in
//! the `Authorization` header. Requests are never retried.

use super::inputs::{
    CommentCreateInput, DocumentCreateInput, DocumentUpdateInput, Filter, InitiativeCreateInput,
    InitiativeUpdateInput, IssueCreateInput, IssueUpdateInput, PageRequest,
};
use super::queries;
use super::types::{
    Comment, Connection, Document, Initiative, Issue, IssueRef, Label, MutationPayload, Nodes,
    Project, Team, User, Viewer, WorkflowState,
};
use super::{EntityLookup, LinearApi};
use crate::config::ApiConfig;
use crate::error::TransportError;
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::time::Duration;
use tracing::{debug, warn};

#[derive(Serialize)]
struct GraphqlRequest<'a> {
    query: &'a str,
    variables: Value,
}

#[derive(Deserialize)]
struct GraphqlResponse {
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    errors: Vec<GraphqlErrorEntry>,
}

#[derive(Deserialize)]
struct GraphqlErrorEntry {
    message: String,
}

#[derive(Deserialize)]
struct SuccessPayload {
    success: bool,
}

fn map_http_error(error: reqwest::Error) -> TransportError {
    if error.is_timeout() {
        warn!("Linear API request timed out");
    } else if error.is_connect() {
        warn!("could not connect to the Linear API");
    }
    TransportError::Http(error)
}

fn build_http_client(config: &ApiConfig) -> Result<Client, TransportError> {
    Client::builder()
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .build()
        .map_err(|e| TransportError::Client(e.to_string()))
}

/// Pull `data.<root>` out of a response and decode it.
fn take_root<T: DeserializeOwned>(data: Value, root: &str) -> Result<T, TransportError> {
    let mut data = match data {
        Value::Object(map) => map,
        _ => return Err(TransportError::MissingField(root.to_string())),
    };
    let value = data
        .remove(root)
        .ok_or_else(|| TransportError::MissingField(root.to_string()))?;
    serde_json::from_value(value)
        .map_err(|e| TransportError::Decode(format!("`{}`: {}", root, e)))
}

/// Best human-readable message for a non-success HTTP response.
fn status_message(status: reqwest::StatusCode, body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<GraphqlResponse>(body) {
        if let Some(first) = parsed.errors.into_iter().next() {
            return first.message;
        }
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("Unknown error")
            .to_string()
    } else {
        trimmed.to_string()
    }
}

fn page_variables(page: &PageRequest) -> Map<String, Value> {
    let mut variables = Map::new();
    variables.insert("first".to_string(), json!(page.first));
    variables.insert("after".to_string(), json!(page.after));
    variables
}

fn team_filter(team_id: Option<&str>) -> Value {
    match team_id {
        Some(id) => json!({ "team": { "id": { "eq": id } } }),
        None => Value::Null,
    }
}

/// Decode a `{ success, <entity> }` mutation payload.
fn mutation_payload<T: DeserializeOwned>(
    payload: Value,
    entity_field: &str,
) -> Result<MutationPayload<T>, TransportError> {
    let success = payload
        .get("success")
        .and_then(Value::as_bool)
        .unwrap_or(false);
    let entity = match payload.get(entity_field) {
        None | Some(Value::Null) => None,
        Some(value) => Some(
            serde_json::from_value(value.clone())
                .map_err(|e| TransportError::Decode(format!("`{}`: {}", entity_field, e)))?,
        ),
    };
    Ok(MutationPayload { success, entity })
}

/// GraphQL client bound to one API key for the lifetime of a command.
pub struct GraphqlClient {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl GraphqlClient {
    pub fn new(api_key: impl Into<String>, config: &ApiConfig) -> Result<Self, TransportError> {
        Ok(Self {
            client: build_http_client(config)?,
            endpoint: config.endpoint.clone(),
            api_key: api_key.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Run one operation and decode `data.<root>`.
    pub async fn execute<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: Value,
        root: &str,
    ) -> Result<T, TransportError> {
        debug!(root, endpoint = %self.endpoint, "sending GraphQL request");

        let response = self
            .client
            .post(&self.endpoint)
            .header("Authorization", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&GraphqlRequest { query, variables })
            .send()
            .await
            .map_err(map_http_error)?;

        let status = response.status();
        let body = response.text().await.map_err(map_http_error)?;

        if !status.is_success() {
            debug!(root, status = status.as_u16(), "GraphQL request failed");
            return Err(TransportError::Status {
                status: status.as_u16(),
                message: status_message(status, &body),
            });
        }

        let parsed: GraphqlResponse =
            serde_json::from_str(&body).map_err(|e| TransportError::Decode(e.to_string()))?;

        if !parsed.errors.is_empty() {
            let messages: Vec<String> = parsed.errors.into_iter().map(|e| e.message).collect();
            debug!(root, count = messages.len(), "GraphQL response carried errors");
            return Err(TransportError::GraphQl {
                message: messages[0].clone(),
                messages,
            });
        }

        let data = parsed
            .data
            .ok_or_else(|| TransportError::MissingField("data".to_string()))?;
        take_root(data, root)
    }

    async fn mutate<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: Value,
        root: &str,
        entity_field: &str,
    ) -> Result<MutationPayload<T>, TransportError> {
        let payload: Value = self.execute(query, variables, root).await?;
        mutation_payload(payload, entity_field)
    }

    async fn mutate_flag(&self, query: &str, id: &str, root: &str) -> Result<bool, TransportError> {
        let payload: SuccessPayload = self.execute(query, json!({ "id": id }), root).await?;
        Ok(payload.success)
    }

    async fn list<T: DeserializeOwned>(
        &self,
        query: &str,
        filter: Value,
        page: &PageRequest,
        root: &str,
    ) -> Result<Connection<T>, TransportError> {
        let mut variables = page_variables(page);
        variables.insert("filter".to_string(), filter);
        self.execute(query, Value::Object(variables), root).await
    }
}

fn filter_value(filter: Option<Filter>) -> Value {
    filter.map(Value::Object).unwrap_or(Value::Null)
}

#[async_trait]
impl EntityLookup for GraphqlClient {
    async fn find_teams_by_key(&self, key: &str) -> Result<Vec<Team>, TransportError> {
        let teams: Nodes<Team> = self
            .execute(queries::TEAMS_BY_KEY, json!({ "key": key }), "teams")
            .await?;
        Ok(teams.nodes)
    }

    async fn find_issue_by_team_and_number(
        &self,
        team_id: &str,
        number: u64,
    ) -> Result<Option<IssueRef>, TransportError> {
        let issues: Nodes<IssueRef> = self
            .execute(
                queries::ISSUE_BY_TEAM_AND_NUMBER,
                json!({ "teamId": team_id, "number": number }),
                "issues",
            )
            .await?;
        Ok(issues.nodes.into_iter().next())
    }
}

#[derive(Deserialize)]
struct IssueLabelsRoot {
    labels: Nodes<Label>,
}

#[derive(Deserialize)]
struct IssueCommentsRoot {
    comments: Connection<Comment>,
}

#[async_trait]
impl LinearApi for GraphqlClient {
    async fn viewer(&self) -> Result<Viewer, TransportError> {
        self.execute(queries::VIEWER, json!({}), "viewer").await
    }

    async fn issues(
        &self,
        filter: Option<Filter>,
        page: &PageRequest,
    ) -> Result<Connection<Issue>, TransportError> {
        self.list(queries::ISSUES, filter_value(filter), page, "issues")
            .await
    }

    async fn issue(&self, id: &str) -> Result<Option<Issue>, TransportError> {
        self.execute(queries::ISSUE, json!({ "id": id }), "issue")
            .await
    }

    async fn issue_labels(&self, issue_id: &str) -> Result<Vec<Label>, TransportError> {
        let issue: Option<IssueLabelsRoot> = self
            .execute(queries::ISSUE_LABELS, json!({ "id": issue_id }), "issue")
            .await?;
        Ok(issue.map(|i| i.labels.nodes).unwrap_or_default())
    }

    async fn issue_comments(
        &self,
        issue_id: &str,
        page: &PageRequest,
    ) -> Result<Connection<Comment>, TransportError> {
        let mut variables = page_variables(page);
        variables.insert("id".to_string(), json!(issue_id));
        let issue: Option<IssueCommentsRoot> = self
            .execute(queries::ISSUE_COMMENTS, Value::Object(variables), "issue")
            .await?;
        issue
            .map(|i| i.comments)
            .ok_or_else(|| TransportError::MissingField("issue".to_string()))
    }

    async fn search_issues(
        &self,
        term: &str,
        filter: Option<Filter>,
        page: &PageRequest,
    ) -> Result<Connection<Issue>, TransportError> {
        let mut variables = page_variables(page);
        variables.insert("term".to_string(), json!(term));
        variables.insert("filter".to_string(), filter_value(filter));
        self.execute(queries::SEARCH_ISSUES, Value::Object(variables), "searchIssues")
            .await
    }

    async fn create_issue(
        &self,
        input: &IssueCreateInput,
    ) -> Result<MutationPayload<Issue>, TransportError> {
        self.mutate(
            queries::ISSUE_CREATE,
            json!({ "input": input }),
            "issueCreate",
            "issue",
        )
        .await
    }

    async fn update_issue(
        &self,
        id: &str,
        input: &IssueUpdateInput,
    ) -> Result<MutationPayload<Issue>, TransportError> {
        self.mutate(
            queries::ISSUE_UPDATE,
            json!({ "id": id, "input": input }),
            "issueUpdate",
            "issue",
        )
        .await
    }

    async fn archive_issue(&self, id: &str) -> Result<bool, TransportError> {
        self.mutate_flag(queries::ISSUE_ARCHIVE, id, "issueArchive")
            .await
    }

    async fn delete_issue(&self, id: &str) -> Result<bool, TransportError> {
        self.mutate_flag(queries::ISSUE_DELETE, id, "issueDelete")
            .await
    }

    async fn create_comment(
        &self,
        input: &CommentCreateInput,
    ) -> Result<MutationPayload<Comment>, TransportError> {
        self.mutate(
            queries::COMMENT_CREATE,
            json!({ "input": input }),
            "commentCreate",
            "comment",
        )
        .await
    }

    async fn documents(
        &self,
        filter: Option<Filter>,
        page: &PageRequest,
    ) -> Result<Connection<Document>, TransportError> {
        self.list(queries::DOCUMENTS, filter_value(filter), page, "documents")
            .await
    }

    async fn document(&self, id: &str) -> Result<Option<Document>, TransportError> {
        self.execute(queries::DOCUMENT, json!({ "id": id }), "document")
            .await
    }

    async fn create_document(
        &self,
        input: &DocumentCreateInput,
    ) -> Result<MutationPayload<Document>, TransportError> {
        self.mutate(
            queries::DOCUMENT_CREATE,
            json!({ "input": input }),
            "documentCreate",
            "document",
        )
        .await
    }

    async fn update_document(
        &self,
        id: &str,
        input: &DocumentUpdateInput,
    ) -> Result<MutationPayload<Document>, TransportError> {
        self.mutate(
            queries::DOCUMENT_UPDATE,
            json!({ "id": id, "input": input }),
            "documentUpdate",
            "document",
        )
        .await
    }

    async fn delete_document(&self, id: &str) -> Result<bool, TransportError> {
        self.mutate_flag(queries::DOCUMENT_DELETE, id, "documentDelete")
            .await
    }

    async fn initiatives(
        &self,
        page: &PageRequest,
    ) -> Result<Connection<Initiative>, TransportError> {
        self.execute(
            queries::INITIATIVES,
            Value::Object(page_variables(page)),
            "initiatives",
        )
        .await
    }

    async fn initiative(&self, id: &str) -> Result<Option<Initiative>, TransportError> {
        self.execute(queries::INITIATIVE, json!({ "id": id }), "initiative")
            .await
    }

    async fn create_initiative(
        &self,
        input: &InitiativeCreateInput,
    ) -> Result<MutationPayload<Initiative>, TransportError> {
        self.mutate(
            queries::INITIATIVE_CREATE,
            json!({ "input": input }),
            "initiativeCreate",
            "initiative",
        )
        .await
    }

    async fn update_initiative(
        &self,
        id: &str,
        input: &InitiativeUpdateInput,
    ) -> Result<MutationPayload<Initiative>, TransportError> {
        self.mutate(
            queries::INITIATIVE_UPDATE,
            json!({ "id": id, "input": input }),
            "initiativeUpdate",
            "initiative",
        )
        .await
    }

    async fn delete_initiative(&self, id: &str) -> Result<bool, TransportError> {
        self.mutate_flag(queries::INITIATIVE_DELETE, id, "initiativeDelete")
            .await
    }

    async fn projects(
        &self,
        filter: Option<Filter>,
        page: &PageRequest,
    ) -> Result<Connection<Project>, TransportError> {
        self.list(queries::PROJECTS, filter_value(filter), page, "projects")
            .await
    }

    async fn users(
        &self,
        filter: Option<Filter>,
        page: &PageRequest,
    ) -> Result<Connection<User>, TransportError> {
        self.list(queries::USERS, filter_value(filter), page, "users")
            .await
    }

    async fn labels(
        &self,
        team_id: Option<&str>,
        page: &PageRequest,
    ) -> Result<Connection<Label>, TransportError> {
        self.list(queries::LABELS, team_filter(team_id), page, "issueLabels")
            .await
    }

    async fn workflow_states(
        &self,
        team_id: Option<&str>,
        page: &PageRequest,
    ) -> Result<Connection<WorkflowState>, TransportError> {
        self.list(
            queries::WORKFLOW_STATES,
            team_filter(team_id),
            page,
            "workflowStates",
        )
        .await
    }
}
