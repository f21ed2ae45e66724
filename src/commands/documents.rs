//! `documents list|get|create|update|delete`

use super::{list_envelope, mutation_entity, page_request, CommandResult};
use crate::api::types::Document;
use crate::api::{DocumentCreateInput, DocumentUpdateInput, Filter, LinearApi};
use crate::classify::Failure;
use crate::cli::{DocumentCreateArgs, DocumentUpdateArgs, PageArgs};
use crate::envelope::build_success;
use crate::error::CliError;
use serde_json::{json, Value};

const DEFAULT_PAGE_SIZE: u32 = 50;

fn document_row(document: Document) -> Value {
    json!({
        "id": document.id,
        "title": document.title,
        "icon": document.icon,
        "color": document.color,
        "projectId": document.project.as_ref().map(|p| p.id.clone()),
        "projectName": document.project.as_ref().map(|p| p.name.clone()),
        "creatorId": document.creator.as_ref().map(|u| u.id.clone()),
        "creatorName": document.creator.as_ref().map(|u| u.name.clone()),
        "createdAt": document.created_at,
        "updatedAt": document.updated_at,
    })
}

pub async fn list(api: &dyn LinearApi, project_id: Option<&str>, page: &PageArgs) -> CommandResult {
    let filter = project_id.map(|id| {
        let mut filter = Filter::new();
        filter.insert("project".to_string(), json!({ "id": { "eq": id } }));
        filter
    });
    let page = page_request(page, DEFAULT_PAGE_SIZE);
    let documents = api.documents(filter, &page).await?;
    Ok(list_envelope(documents, document_row))
}

pub async fn get(api: &dyn LinearApi, id: &str) -> CommandResult {
    let document = api
        .document(id)
        .await?
        .ok_or_else(|| CliError::not_found(format!("Document {} not found", id)))?;
    Ok(build_success(json!({
        "id": document.id,
        "title": document.title,
        "content": document.content,
        "icon": document.icon,
        "color": document.color,
        "project": document.project.map(|p| json!({ "id": p.id, "name": p.name })),
        "creator": document.creator.map(|u| json!({ "id": u.id, "name": u.name })),
        "createdAt": document.created_at,
        "updatedAt": document.updated_at,
    })))
}

pub async fn create(api: &dyn LinearApi, args: &DocumentCreateArgs) -> CommandResult {
    let title = args
        .title
        .clone()
        .filter(|t| !t.is_empty())
        .ok_or_else(|| CliError::missing_field("Missing required flag: --title"))?;
    let input = DocumentCreateInput {
        title,
        content: args.content.clone(),
        project_id: args.project_id.clone().filter(|p| !p.is_empty()),
        icon: args.icon.clone(),
        color: args.color.clone(),
    };
    let payload = api.create_document(&input).await?;
    let document = mutation_entity(payload, "Failed to create document", "Document not returned")?;
    Ok(build_success(json!({
        "id": document.id,
        "title": document.title,
        "project": document.project.map(|p| json!({ "id": p.id, "name": p.name })),
        "createdAt": document.created_at,
    })))
}

fn update_input(args: &DocumentUpdateArgs) -> Result<DocumentUpdateInput, CliError> {
    let input = DocumentUpdateInput {
        title: args.title.clone().filter(|t| !t.is_empty()),
        content: args.content.clone().filter(|c| !c.is_empty()),
        // An empty id detaches the document from its project.
        project_id: args
            .project_id
            .as_ref()
            .map(|id| Some(id.clone()).filter(|id| !id.is_empty())),
        icon: args.icon.clone().filter(|i| !i.is_empty()),
        color: args.color.clone().filter(|c| !c.is_empty()),
    };
    if input.is_empty() {
        return Err(CliError::invalid_input("No update fields provided"));
    }
    Ok(input)
}

pub async fn update(api: &dyn LinearApi, args: &DocumentUpdateArgs) -> CommandResult {
    let input = update_input(args)?;
    let payload = api.update_document(&args.id, &input).await?;
    let document = mutation_entity(payload, "Failed to update document", "Document not returned")?;
    Ok(build_success(json!({
        "id": document.id,
        "title": document.title,
        "updatedAt": document.updated_at,
    })))
}

pub async fn delete(api: &dyn LinearApi, id: &str) -> CommandResult {
    if !api.delete_document(id).await? {
        return Err(Failure::from(CliError::api("Failed to delete document")));
    }
    Ok(build_success(json!({ "id": id, "deleted": true })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::{ProjectSummary, UserSummary};
    use crate::error::ErrorCode;

    #[test]
    fn test_document_row_flattens_relations() {
        let row = document_row(Document {
            id: "d1".to_string(),
            title: "Roadmap".to_string(),
            content: Some("body".to_string()),
            icon: None,
            color: None,
            project: Some(ProjectSummary {
                id: "p1".to_string(),
                name: "Apollo".to_string(),
                progress: None,
            }),
            creator: Some(UserSummary {
                id: "u1".to_string(),
                name: "Ada".to_string(),
                email: None,
            }),
            created_at: "2024-01-01T00:00:00Z".to_string(),
            updated_at: "2024-01-02T00:00:00Z".to_string(),
        });
        assert_eq!(row["projectName"], "Apollo");
        assert_eq!(row["creatorId"], "u1");
        assert!(row.get("content").is_none());
    }

    #[test]
    fn test_update_requires_a_field() {
        let args = DocumentUpdateArgs {
            id: "d1".to_string(),
            ..Default::default()
        };
        let err = update_input(&args).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidInput);
        assert_eq!(err.message, "No update fields provided");
    }

    #[test]
    fn test_empty_project_id_detaches() {
        let args = DocumentUpdateArgs {
            id: "d1".to_string(),
            project_id: Some(String::new()),
            ..Default::default()
        };
        let input = update_input(&args).unwrap();
        assert_eq!(
            serde_json::to_value(&input).unwrap(),
            json!({ "projectId": null })
        );
    }
}
