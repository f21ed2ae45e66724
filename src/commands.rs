//! Command handlers.
//!
//! Each handler validates its arguments, resolves issue references, calls
//! [`LinearApi`](crate::api::LinearApi) and shapes the result into a
//! [`ResponseEnvelope`]. Rendering is left to the caller.

pub mod auth;
pub mod catalog;
pub mod comments;
pub mod documents;
pub mod initiatives;
pub mod issues;
pub mod me;
pub mod search;

use crate::api::types::{Connection, MutationPayload, Team};
use crate::api::{Filter, LinearApi, PageRequest};
use crate::classify::Failure;
use crate::cli::PageArgs;
use crate::envelope::{build_success_list, ResponseEnvelope};
use crate::error::CliError;
use serde_json::{Map, Value};

pub type CommandResult = Result<ResponseEnvelope, Failure>;

/// Page request from `--first` / `--after`, with a per-command default size.
pub(crate) fn page_request(page: &PageArgs, default_first: u32) -> PageRequest {
    PageRequest::new(page.first.unwrap_or(default_first), page.after.clone())
}

/// List envelope from a connection, threading `pageInfo` through untouched.
pub(crate) fn list_envelope<T>(
    connection: Connection<T>,
    row: impl Fn(T) -> Value,
) -> ResponseEnvelope {
    let rows = connection.nodes.into_iter().map(row).collect();
    build_success_list(rows, Some(connection.page_info))
}

/// Parse a user-supplied JSON object (`--filter`, `--input`).
pub(crate) fn parse_json_object(
    input: &str,
    message: &str,
) -> Result<Map<String, Value>, CliError> {
    match serde_json::from_str::<Value>(input) {
        Ok(Value::Object(map)) => Ok(map),
        _ => Err(CliError::invalid_input(message)),
    }
}

/// `None` when the filter has no clauses.
pub(crate) fn non_empty(filter: Filter) -> Option<Filter> {
    if filter.is_empty() {
        None
    } else {
        Some(filter)
    }
}

/// Comma-separated ids, trimmed, empties dropped.
pub(crate) fn split_ids(ids: &str) -> Vec<String> {
    ids.split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect()
}

/// The entity of a mutation, or `API_ERROR` with `failed` when the API
/// reported failure and `missing` when it returned no entity.
pub(crate) fn mutation_entity<T>(
    payload: MutationPayload<T>,
    failed: &str,
    missing: &str,
) -> Result<T, CliError> {
    if !payload.success {
        return Err(CliError::api(failed));
    }
    payload.entity.ok_or_else(|| CliError::api(missing))
}

/// Team by exact key, or `NOT_FOUND`.
pub(crate) async fn find_team(api: &dyn LinearApi, key: &str) -> Result<Team, Failure> {
    api.find_teams_by_key(key)
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| Failure::from(CliError::not_found(format!("Team {} not found", key))))
}
