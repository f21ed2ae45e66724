//! `comments list|add`

use super::{list_envelope, mutation_entity, page_request, CommandResult};
use crate::api::types::{Comment, Issue};
use crate::api::{CommentCreateInput, LinearApi};
use crate::classify::Failure;
use crate::cli::PageArgs;
use crate::envelope::build_success;
use crate::error::CliError;
use crate::identifier::{IdentifierResolver, ResolvedId};
use serde_json::{json, Value};

const DEFAULT_PAGE_SIZE: u32 = 50;

fn comment_row(comment: Comment) -> Value {
    let user = comment.user;
    json!({
        "id": comment.id,
        "body": comment.body,
        "createdAt": comment.created_at,
        "updatedAt": comment.updated_at,
        "userId": user.as_ref().map(|u| u.id.clone()),
        "userName": user.as_ref().map(|u| u.name.clone()).unwrap_or_else(|| "Unknown".to_string()),
        "userEmail": user.as_ref().and_then(|u| u.email.clone()),
    })
}

/// Resolve `reference` and make sure the issue exists.
async fn existing_issue(
    api: &dyn LinearApi,
    reference: &str,
) -> Result<(ResolvedId, Issue), Failure> {
    let id = IdentifierResolver::new(api).resolve(reference).await?;
    let issue = api
        .issue(id.as_str())
        .await?
        .ok_or_else(|| CliError::not_found(format!("Issue {} not found", reference)))?;
    Ok((id, issue))
}

pub async fn list(api: &dyn LinearApi, reference: &str, page: &PageArgs) -> CommandResult {
    let (id, _issue) = existing_issue(api, reference).await?;
    let page = page_request(page, DEFAULT_PAGE_SIZE);
    let comments = api.issue_comments(id.as_str(), &page).await?;
    Ok(list_envelope(comments, comment_row))
}

pub async fn add(api: &dyn LinearApi, reference: &str, body: Option<&str>) -> CommandResult {
    let body = body
        .filter(|b| !b.trim().is_empty())
        .ok_or_else(|| CliError::missing_field("Missing required flag: --body"))?;
    let (id, issue) = existing_issue(api, reference).await?;

    let input = CommentCreateInput {
        issue_id: id.into_string(),
        body: body.to_string(),
    };
    let payload = api.create_comment(&input).await?;
    let comment = mutation_entity(payload, "Failed to create comment", "Failed to create comment")?;

    Ok(build_success(json!({
        "id": comment.id,
        "body": comment.body,
        "createdAt": comment.created_at,
        "user": comment.user.map(|u| json!({ "id": u.id, "name": u.name, "email": u.email })),
        "issue": {
            "id": issue.id,
            "identifier": issue.identifier,
            "title": issue.title,
        },
    })))
}
