//! `initiatives list|get|create|update|delete`
//!
//! Linear offers no server-side initiative filter, so `--status` is applied
//! to the fetched page.

use super::{mutation_entity, page_request, CommandResult};
use crate::api::types::{Initiative, ProjectSummary};
use crate::api::{InitiativeCreateInput, InitiativeUpdateInput, LinearApi};
use crate::classify::Failure;
use crate::cli::{InitiativeCreateArgs, InitiativeUpdateArgs, PageArgs};
use crate::envelope::{build_success, build_success_list};
use crate::error::CliError;
use serde_json::{json, Value};

const DEFAULT_PAGE_SIZE: u32 = 50;

/// Mean progress of `projects`, 0.0 when there are none.
pub(crate) fn mean_progress(projects: &[ProjectSummary]) -> f64 {
    if projects.is_empty() {
        return 0.0;
    }
    let total: f64 = projects.iter().map(|p| p.progress.unwrap_or(0.0)).sum();
    total / projects.len() as f64
}

fn percent(progress: f64) -> String {
    format!("{}%", (progress * 100.0).round() as i64)
}

fn initiative_row(initiative: Initiative) -> Value {
    let projects = &initiative.projects.nodes;
    json!({
        "id": initiative.id,
        "name": initiative.name,
        "status": initiative.status,
        "owner": initiative.owner.as_ref().map(|u| json!({ "id": u.id, "name": u.name })),
        "targetDate": initiative.target_date,
        "projectCount": projects.len(),
        "progress": percent(mean_progress(projects)),
        "createdAt": initiative.created_at,
    })
}

pub async fn list(api: &dyn LinearApi, status: Option<&str>, page: &PageArgs) -> CommandResult {
    let page = page_request(page, DEFAULT_PAGE_SIZE);
    let initiatives = api.initiatives(&page).await?;
    let rows = initiatives
        .nodes
        .into_iter()
        .filter(|i| status.map_or(true, |s| i.status == s))
        .map(initiative_row)
        .collect();
    Ok(build_success_list(rows, Some(initiatives.page_info)))
}

pub async fn get(api: &dyn LinearApi, id: &str) -> CommandResult {
    let initiative = api
        .initiative(id)
        .await?
        .ok_or_else(|| CliError::not_found(format!("Initiative {} not found", id)))?;
    Ok(build_success(json!({
        "id": initiative.id,
        "name": initiative.name,
        "description": initiative.description,
        "status": initiative.status,
        "icon": initiative.icon,
        "color": initiative.color,
        "owner": initiative.owner.map(|u| json!({ "id": u.id, "name": u.name })),
        "creator": initiative.creator.map(|u| json!({ "id": u.id, "name": u.name })),
        "targetDate": initiative.target_date,
        "projects": initiative
            .projects
            .nodes
            .iter()
            .map(|p| json!({ "id": p.id, "name": p.name }))
            .collect::<Vec<_>>(),
        "createdAt": initiative.created_at,
        "updatedAt": initiative.updated_at,
    })))
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value.clone().filter(|v| !v.is_empty())
}

pub async fn create(api: &dyn LinearApi, args: &InitiativeCreateArgs) -> CommandResult {
    let name = non_empty(&args.name)
        .ok_or_else(|| CliError::missing_field("Missing required flag: --name"))?;
    let input = InitiativeCreateInput {
        name,
        description: non_empty(&args.description),
        status: non_empty(&args.status),
        target_date: non_empty(&args.target_date),
        owner_id: non_empty(&args.owner_id),
        icon: non_empty(&args.icon),
        color: non_empty(&args.color),
    };
    let payload = api.create_initiative(&input).await?;
    let initiative =
        mutation_entity(payload, "Failed to create initiative", "Initiative not returned")?;
    Ok(build_success(json!({
        "id": initiative.id,
        "name": initiative.name,
        "status": initiative.status,
        "owner": initiative.owner.map(|u| json!({ "id": u.id, "name": u.name })),
        "createdAt": initiative.created_at,
    })))
}

fn update_input(args: &InitiativeUpdateArgs) -> Result<InitiativeUpdateInput, CliError> {
    let input = InitiativeUpdateInput {
        name: non_empty(&args.name),
        description: non_empty(&args.description),
        status: non_empty(&args.status),
        target_date: non_empty(&args.target_date),
        owner_id: non_empty(&args.owner_id),
        icon: non_empty(&args.icon),
        color: non_empty(&args.color),
    };
    if input.is_empty() {
        return Err(CliError::invalid_input("No update fields provided"));
    }
    Ok(input)
}

pub async fn update(api: &dyn LinearApi, args: &InitiativeUpdateArgs) -> CommandResult {
    let input = update_input(args)?;
    let payload = api.update_initiative(&args.id, &input).await?;
    let initiative =
        mutation_entity(payload, "Failed to update initiative", "Initiative not returned")?;
    Ok(build_success(json!({
        "id": initiative.id,
        "name": initiative.name,
        "status": initiative.status,
        "updatedAt": initiative.updated_at,
    })))
}

pub async fn delete(api: &dyn LinearApi, id: &str) -> CommandResult {
    if !api.delete_initiative(id).await? {
        return Err(Failure::from(CliError::api("Failed to delete initiative")));
    }
    Ok(build_success(json!({ "id": id, "deleted": true })))
}
