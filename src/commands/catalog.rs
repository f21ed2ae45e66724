//! `projects list`, `users list`, `labels list`, `states list`

use super::{find_team, list_envelope, non_empty, page_request, CommandResult};
use crate::api::types::{Label, Project, User, WorkflowState};
use crate::api::{Filter, LinearApi};
use crate::cli::PageArgs;
use crate::envelope::build_success_list;
use serde_json::{json, Value};
use std::cmp::Ordering;
use tracing::debug;

const PROJECT_PAGE_SIZE: u32 = 50;
const USER_PAGE_SIZE: u32 = 100;
const LABEL_PAGE_SIZE: u32 = 100;
const STATE_PAGE_SIZE: u32 = 100;

fn project_row(project: Project) -> Value {
    json!({
        "id": project.id,
        "name": project.name,
        "description": project.description,
        "state": project.state,
        "progress": project.progress,
        "targetDate": project.target_date,
        "url": project.url,
        "createdAt": project.created_at,
        "updatedAt": project.updated_at,
    })
}

pub async fn projects(
    api: &dyn LinearApi,
    team: Option<&str>,
    state: Option<&str>,
    page: &PageArgs,
) -> CommandResult {
    let mut filter = Filter::new();
    if let Some(state) = state {
        filter.insert("state".to_string(), json!({ "eq": state }));
    }
    if let Some(team) = team {
        filter.insert(
            "accessibleTeams".to_string(),
            json!({ "key": { "eq": team } }),
        );
    }
    let page = page_request(page, PROJECT_PAGE_SIZE);
    let projects = api.projects(non_empty(filter), &page).await?;
    Ok(list_envelope(projects, project_row))
}

fn user_row(user: User) -> Value {
    json!({
        "id": user.id,
        "name": user.name,
        "displayName": user.display_name,
        "email": user.email,
        "active": user.active,
        "admin": user.admin,
        "guest": user.guest,
        "avatarUrl": user.avatar_url,
        "createdAt": user.created_at,
    })
}

pub async fn users(api: &dyn LinearApi, active_only: bool, page: &PageArgs) -> CommandResult {
    let filter = active_only.then(|| {
        let mut filter = Filter::new();
        filter.insert("active".to_string(), json!({ "eq": true }));
        filter
    });
    let page = page_request(page, USER_PAGE_SIZE);
    let users = api.users(filter, &page).await?;
    Ok(list_envelope(users, user_row))
}

fn label_row(label: Label) -> Value {
    json!({
        "id": label.id,
        "name": label.name,
        "color": label.color,
        "description": label.description,
        "isGroup": label.is_group,
        "parentId": label.parent.map(|p| p.id),
        "createdAt": label.created_at,
    })
}

pub async fn labels(api: &dyn LinearApi, team: Option<&str>, page: &PageArgs) -> CommandResult {
    let team_id = match team {
        Some(key) => Some(find_team(api, key).await?.id),
        None => None,
    };
    let page = page_request(page, LABEL_PAGE_SIZE);
    let labels = api.labels(team_id.as_deref(), &page).await?;
    Ok(list_envelope(labels, label_row))
}

/// Display order of workflow state types; unknown types sort last.
pub(crate) fn state_type_rank(state_type: &str) -> u8 {
    match state_type {
        "backlog" => 1,
        "unstarted" => 2,
        "started" => 3,
        "completed" => 4,
        "canceled" => 5,
        _ => 99,
    }
}

/// Team key, then state type, then position within the type.
pub(crate) fn compare_states(a: &WorkflowState, b: &WorkflowState) -> Ordering {
    let team_key = |s: &WorkflowState| s.team.as_ref().map(|t| t.key.clone()).unwrap_or_default();
    team_key(a)
        .cmp(&team_key(b))
        .then_with(|| state_type_rank(&a.state_type).cmp(&state_type_rank(&b.state_type)))
        .then_with(|| a.position.total_cmp(&b.position))
}

fn state_row(state: WorkflowState) -> Value {
    let (team_id, team_key) = state
        .team
        .map(|t| (t.id, t.key))
        .unwrap_or_default();
    json!({
        "id": state.id,
        "name": state.name,
        "color": state.color,
        "type": state.state_type,
        "position": state.position,
        "teamId": team_id,
        "teamKey": team_key,
    })
}

pub async fn states(api: &dyn LinearApi, team: Option<&str>, page: &PageArgs) -> CommandResult {
    let team_id = match team {
        Some(key) => Some(find_team(api, key).await?.id),
        None => None,
    };
    let page = page_request(page, STATE_PAGE_SIZE);
    let mut connection = api.workflow_states(team_id.as_deref(), &page).await?;
    connection.nodes.sort_by(compare_states);
    debug!(count = connection.nodes.len(), "workflow states sorted");

    let rows = connection.nodes.into_iter().map(state_row).collect();
    Ok(build_success_list(rows, Some(connection.page_info)))
}
