//! `issues list|get|create|update|delete`

use super::{list_envelope, non_empty, page_request, parse_json_object, split_ids, CommandResult};
use crate::api::types::{Issue, Label};
use crate::api::{Filter, IssueCreateInput, IssueUpdateInput, LinearApi, PageRequest};
use crate::classify::Failure;
use crate::cli::{IssueCreateArgs, IssueListArgs, IssueUpdateArgs};
use crate::envelope::build_success;
use crate::error::CliError;
use crate::identifier::IdentifierResolver;
use serde_json::{json, Value};
use tracing::debug;

const DEFAULT_PAGE_SIZE: u32 = 50;
/// Comments fetched to count them on `issues get`.
const COMMENT_COUNT_PAGE: u32 = 250;
const INVALID_INPUT_JSON: &str = "Invalid JSON in --input flag";

/// Flat list row shared by `issues list` and `search`.
pub(crate) fn issue_row(issue: Issue) -> Value {
    json!({
        "id": issue.id,
        "identifier": issue.identifier,
        "title": issue.title,
        "description": issue.description,
        "priority": issue.priority,
        "priorityLabel": issue.priority_label,
        "estimate": issue.estimate,
        "url": issue.url,
        "createdAt": issue.created_at,
        "updatedAt": issue.updated_at,
    })
}

fn label_row(label: &Label) -> Value {
    json!({ "id": label.id, "name": label.name, "color": label.color })
}

pub async fn list(api: &dyn LinearApi, args: &IssueListArgs) -> CommandResult {
    let mut filter: Filter = match &args.filter {
        Some(raw) => parse_json_object(raw, "Invalid JSON in --filter flag")?,
        None => Filter::new(),
    };
    if let Some(team) = &args.team {
        filter.insert("team".to_string(), json!({ "key": { "eq": team } }));
    }
    if let Some(assignee) = &args.assignee {
        let assignee_id = if assignee == "me" {
            api.viewer().await?.id
        } else {
            assignee.clone()
        };
        filter.insert("assignee".to_string(), json!({ "id": { "eq": assignee_id } }));
    }
    if let Some(state) = &args.state {
        filter.insert("state".to_string(), json!({ "name": { "eq": state } }));
    }

    let page = page_request(&args.page, DEFAULT_PAGE_SIZE);
    let issues = api.issues(non_empty(filter), &page).await?;
    Ok(list_envelope(issues, issue_row))
}

pub async fn get(api: &dyn LinearApi, reference: &str) -> CommandResult {
    let id = IdentifierResolver::new(api).resolve(reference).await?;
    let comment_page = PageRequest::new(COMMENT_COUNT_PAGE, None);
    let (issue, labels, comments) = futures::join!(
        api.issue(id.as_str()),
        api.issue_labels(id.as_str()),
        api.issue_comments(id.as_str(), &comment_page),
    );
    let issue = issue?
        .ok_or_else(|| CliError::not_found(format!("Issue {} not found", reference)))?;
    let labels = labels?;
    let comments = comments?;

    Ok(build_success(json!({
        "id": issue.id,
        "identifier": issue.identifier,
        "title": issue.title,
        "description": issue.description,
        "priority": issue.priority,
        "priorityLabel": issue.priority_label,
        "estimate": issue.estimate,
        "url": issue.url,
        "createdAt": issue.created_at,
        "updatedAt": issue.updated_at,
        "state": issue.state.map(|s| json!({
            "id": s.id, "name": s.name, "color": s.color, "type": s.state_type,
        })),
        "assignee": issue.assignee.map(|u| json!({ "id": u.id, "name": u.name, "email": u.email })),
        "team": issue.team.map(|t| json!({ "id": t.id, "key": t.key, "name": t.name })),
        "labels": labels.iter().map(label_row).collect::<Vec<_>>(),
        "commentsCount": comments.nodes.len(),
    })))
}

fn create_input(
    args: &IssueCreateArgs,
    default_team_id: Option<&str>,
) -> Result<IssueCreateInput, CliError> {
    if let Some(raw) = &args.input {
        return serde_json::from_str(raw).map_err(|_| CliError::invalid_input(INVALID_INPUT_JSON));
    }
    let title = args
        .title
        .clone()
        .ok_or_else(|| CliError::missing_field("Missing required flag: --title"))?;
    let team_id = args
        .team_id
        .clone()
        .or_else(|| default_team_id.map(str::to_string))
        .ok_or_else(|| {
            CliError::missing_field(
                "Missing required flag: --team-id (or set default_team_id in config)",
            )
        })?;
    Ok(IssueCreateInput {
        title,
        team_id,
        description: args.description.clone(),
        priority: args.priority,
        assignee_id: args.assignee_id.clone(),
        state_id: args.state_id.clone(),
        project_id: args.project_id.clone(),
        estimate: args.estimate,
        label_ids: args.label_ids.as_deref().map(split_ids),
        ..Default::default()
    })
}

pub async fn create(
    api: &dyn LinearApi,
    args: &IssueCreateArgs,
    default_team_id: Option<&str>,
) -> CommandResult {
    let input = create_input(args, default_team_id)?;
    let payload = api.create_issue(&input).await?;
    let issue = super::mutation_entity(payload, "Failed to create issue", "Failed to create issue")?;
    debug!(identifier = %issue.identifier, "issue created");
    Ok(build_success(json!({
        "id": issue.id,
        "identifier": issue.identifier,
        "title": issue.title,
        "url": issue.url,
        "createdAt": issue.created_at,
    })))
}

fn update_input(args: &IssueUpdateArgs) -> Result<IssueUpdateInput, CliError> {
    let input = match &args.input {
        Some(raw) => serde_json::from_str(raw)
            .map_err(|_| CliError::invalid_input(INVALID_INPUT_JSON))?,
        None => IssueUpdateInput {
            title: args.title.clone().filter(|t| !t.is_empty()),
            description: args.description.clone().filter(|d| !d.is_empty()),
            priority: args.priority,
            // An empty id unassigns.
            assignee_id: args
                .assignee_id
                .as_ref()
                .map(|id| Some(id.clone()).filter(|id| !id.is_empty())),
            state_id: args.state_id.clone().filter(|s| !s.is_empty()),
            project_id: args.project_id.clone().filter(|p| !p.is_empty()),
            estimate: args.estimate,
            label_ids: args
                .label_ids
                .as_deref()
                .filter(|ids| !ids.is_empty())
                .map(split_ids),
            ..Default::default()
        },
    };
    if input.is_empty() {
        return Err(CliError::invalid_input(
            "No update fields provided. Use --input or individual flags.",
        ));
    }
    Ok(input)
}

pub async fn update(api: &dyn LinearApi, args: &IssueUpdateArgs) -> CommandResult {
    let id = IdentifierResolver::new(api).resolve(&args.reference).await?;
    let input = update_input(args)?;
    let payload = api.update_issue(id.as_str(), &input).await?;
    let issue = payload
        .entity
        .ok_or_else(|| CliError::api("Failed to update issue"))?;
    Ok(build_success(json!({
        "id": issue.id,
        "identifier": issue.identifier,
        "title": issue.title,
        "url": issue.url,
        "updatedAt": issue.updated_at,
    })))
}

pub async fn delete(api: &dyn LinearApi, reference: &str, permanent: bool) -> CommandResult {
    let id = IdentifierResolver::new(api).resolve(reference).await?;
    let issue = api
        .issue(id.as_str())
        .await?
        .ok_or_else(|| CliError::not_found(format!("Issue {} not found", reference)))?;

    // Permanent deletion still archives first.
    if !api.archive_issue(id.as_str()).await? {
        return Err(Failure::from(CliError::api("Failed to archive issue")));
    }
    if permanent && !api.delete_issue(id.as_str()).await? {
        return Err(Failure::from(CliError::api("Failed to delete issue")));
    }

    let message = if permanent {
        format!("Issue {} permanently deleted", issue.identifier)
    } else {
        format!("Issue {} moved to trash", issue.identifier)
    };
    Ok(build_success(json!({
        "id": id.as_str(),
        "identifier": issue.identifier,
        "deleted": true,
        "permanent": permanent,
        "message": message,
    })))
}
