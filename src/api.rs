//! Linear API capability surface
//!
//! Commands talk to Linear through [`LinearApi`], a capability object with a
//! single production adapter ([`graphql::GraphqlClient`]) and fakes in tests.
//! The two lookups identifier resolution needs live in the [`EntityLookup`]
//! supertrait so the resolver can be exercised without the full surface.

use crate::config::ApiConfig;
use crate::error::TransportError;
use async_trait::async_trait;
use std::sync::Arc;

pub mod graphql;
pub mod inputs;
mod queries;
pub mod types;

pub use graphql::GraphqlClient;
pub use inputs::{
    CommentCreateInput, DocumentCreateInput, DocumentUpdateInput, Filter, InitiativeCreateInput,
    InitiativeUpdateInput, IssueCreateInput, IssueUpdateInput, PageRequest,
};
use types::{
    Comment, Connection, Document, Initiative, Issue, IssueRef, Label, MutationPayload, Project,
    Team, User, Viewer, WorkflowState,
};

/// Lookups used to turn a compound key (`ENG-123`) into an opaque id.
#[async_trait]
pub trait EntityLookup: Send + Sync {
    /// Teams whose key equals `key` exactly.
    async fn find_teams_by_key(&self, key: &str) -> Result<Vec<Team>, TransportError>;

    /// The issue numbered `number` within team `team_id`, if any.
    async fn find_issue_by_team_and_number(
        &self,
        team_id: &str,
        number: u64,
    ) -> Result<Option<IssueRef>, TransportError>;
}

/// Everything the command layer needs from Linear.
///
/// Single-entity fetches return `Ok(None)` when the entity does not exist.
/// Mutations report the API's `success` flag alongside the returned entity;
/// deletes and archives report the flag alone.
#[async_trait]
pub trait LinearApi: EntityLookup {
    async fn viewer(&self) -> Result<Viewer, TransportError>;

    async fn issues(
        &self,
        filter: Option<Filter>,
        page: &PageRequest,
    ) -> Result<Connection<Issue>, TransportError>;

    async fn issue(&self, id: &str) -> Result<Option<Issue>, TransportError>;

    async fn issue_labels(&self, issue_id: &str) -> Result<Vec<Label>, TransportError>;

    async fn issue_comments(
        &self,
        issue_id: &str,
        page: &PageRequest,
    ) -> Result<Connection<Comment>, TransportError>;

    async fn search_issues(
        &self,
        term: &str,
        filter: Option<Filter>,
        page: &PageRequest,
    ) -> Result<Connection<Issue>, TransportError>;

    async fn create_issue(
        &self,
        input: &IssueCreateInput,
    ) -> Result<MutationPayload<Issue>, TransportError>;

    async fn update_issue(
        &self,
        id: &str,
        input: &IssueUpdateInput,
    ) -> Result<MutationPayload<Issue>, TransportError>;

    async fn archive_issue(&self, id: &str) -> Result<bool, TransportError>;

    async fn delete_issue(&self, id: &str) -> Result<bool, TransportError>;

    async fn create_comment(
        &self,
        input: &CommentCreateInput,
    ) -> Result<MutationPayload<Comment>, TransportError>;

    async fn documents(
        &self,
        filter: Option<Filter>,
        page: &PageRequest,
    ) -> Result<Connection<Document>, TransportError>;

    async fn document(&self, id: &str) -> Result<Option<Document>, TransportError>;

    async fn create_document(
        &self,
        input: &DocumentCreateInput,
    ) -> Result<MutationPayload<Document>, TransportError>;

    async fn update_document(
        &self,
        id: &str,
        input: &DocumentUpdateInput,
    ) -> Result<MutationPayload<Document>, TransportError>;

    async fn delete_document(&self, id: &str) -> Result<bool, TransportError>;

    async fn initiatives(&self, page: &PageRequest)
        -> Result<Connection<Initiative>, TransportError>;

    async fn initiative(&self, id: &str) -> Result<Option<Initiative>, TransportError>;

    async fn create_initiative(
        &self,
        input: &InitiativeCreateInput,
    ) -> Result<MutationPayload<Initiative>, TransportError>;

    async fn update_initiative(
        &self,
        id: &str,
        input: &InitiativeUpdateInput,
    ) -> Result<MutationPayload<Initiative>, TransportError>;

    async fn delete_initiative(&self, id: &str) -> Result<bool, TransportError>;

    async fn projects(
        &self,
        filter: Option<Filter>,
        page: &PageRequest,
    ) -> Result<Connection<Project>, TransportError>;

    async fn users(
        &self,
        filter: Option<Filter>,
        page: &PageRequest,
    ) -> Result<Connection<User>, TransportError>;

    /// Workspace labels, or one team's labels when `team_id` is given.
    async fn labels(
        &self,
        team_id: Option<&str>,
        page: &PageRequest,
    ) -> Result<Connection<Label>, TransportError>;

    /// Workflow states, or one team's states when `team_id` is given.
    async fn workflow_states(
        &self,
        team_id: Option<&str>,
        page: &PageRequest,
    ) -> Result<Connection<WorkflowState>, TransportError>;
}

/// Builds an API client for a given key.
///
/// `auth login` validates a key that is not stored yet, so commands receive
/// a connector rather than a ready-made client.
pub trait ApiConnector: Send + Sync {
    fn connect(&self, api_key: &str) -> Result<Arc<dyn LinearApi>, TransportError>;
}

/// Connects through [`GraphqlClient`] with the configured endpoint and timeouts.
#[derive(Debug, Clone)]
pub struct GraphqlConnector {
    config: ApiConfig,
}

impl GraphqlConnector {
    pub fn new(config: ApiConfig) -> Self {
        Self { config }
    }
}

impl ApiConnector for GraphqlConnector {
    fn connect(&self, api_key: &str) -> Result<Arc<dyn LinearApi>, TransportError> {
        Ok(Arc::new(GraphqlClient::new(api_key, &self.config)?))
    }
}
