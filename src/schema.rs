//! Static entity catalogue behind `linear schema`.
//!
//! Lets scripts and agents discover which entities exist, which operations
//! the CLI offers on them, their fields, filters and create inputs.

use crate::envelope::{build_success, ResponseEnvelope};
use crate::error::CliError;
use serde_json::{json, Map, Value};

fn field(field_type: &str, description: &str) -> Value {
    json!({ "type": field_type, "description": description })
}

fn required(field_type: &str, description: &str) -> Value {
    json!({ "type": field_type, "required": true, "description": description })
}

fn issues() -> Value {
    json!({
        "entity": "issues",
        "operations": ["list", "get", "create", "update", "delete"],
        "description": "Work items in Linear (bugs, features, tasks)",
        "fields": {
            "id": field("ID!", "Unique identifier"),
            "identifier": field("String!", "Human-readable identifier (e.g., ENG-123)"),
            "title": field("String!", "Issue title"),
            "description": field("String", "Issue description in markdown"),
            "priority": field("Int!", "Priority (0=none, 1=urgent, 2=high, 3=medium, 4=low)"),
            "priorityLabel": field("String!", "Priority label text"),
            "estimate": field("Float", "Story points estimate"),
            "url": field("String!", "Linear URL"),
            "createdAt": field("DateTime!", "Creation timestamp"),
            "updatedAt": field("DateTime!", "Last update timestamp"),
        },
        "filters": {
            "team": field("TeamFilter", "Filter by team"),
            "assignee": field("UserFilter", "Filter by assignee"),
            "state": field("WorkflowStateFilter", "Filter by state"),
            "project": field("ProjectFilter", "Filter by project"),
            "priority": field("IntComparator", "Filter by priority"),
            "estimate": field("EstimateComparator", "Filter by estimate"),
            "labels": field("IssueLabelFilter", "Filter by labels"),
            "createdAt": field("DateComparator", "Filter by creation date"),
            "updatedAt": field("DateComparator", "Filter by update date"),
        },
        "createInput": {
            "title": required("String!", "Issue title"),
            "teamId": required("ID!", "Team ID"),
            "description": field("String", "Issue description in markdown"),
            "priority": field("Int", "Priority (0-4)"),
            "assigneeId": field("ID", "Assignee user ID"),
            "stateId": field("ID", "Workflow state ID"),
            "projectId": field("ID", "Project ID"),
            "estimate": field("Float", "Story points estimate"),
            "labelIds": field("[ID!]", "Array of label IDs"),
        },
        "examples": {
            "list": "linear issues list --team ENG --state \"In Progress\"",
            "get": "linear issues get ENG-123",
            "create": "linear issues create --title \"Fix bug\" --team-id xxx",
            "update": "linear issues update ENG-123 --state-id yyy",
            "delete": "linear issues delete ENG-123",
        },
    })
}

fn comments() -> Value {
    json!({
        "entity": "comments",
        "operations": ["list", "add"],
        "description": "Comments on issues",
        "fields": {
            "id": field("ID!", "Unique identifier"),
            "body": field("String!", "Comment body in markdown"),
            "createdAt": field("DateTime!", "Creation timestamp"),
        },
        "createInput": {
            "body": required("String!", "Comment body in markdown"),
            "issueId": required("ID!", "Issue ID to comment on"),
        },
        "examples": {
            "list": "linear comments list ENG-123",
            "add": "linear comments add ENG-123 --body \"Looks good\"",
        },
    })
}

fn documents() -> Value {
    json!({
        "entity": "documents",
        "operations": ["list", "get", "create", "update", "delete"],
        "description": "Markdown documents, optionally attached to a project",
        "fields": {
            "id": field("ID!", "Unique identifier"),
            "title": field("String!", "Document title"),
            "content": field("String", "Content in markdown"),
            "icon": field("String", "Icon (emoji)"),
            "color": field("String", "Icon color (hex)"),
            "createdAt": field("DateTime!", "Creation timestamp"),
            "updatedAt": field("DateTime!", "Last update timestamp"),
        },
        "filters": {
            "project": field("ProjectFilter", "Filter by project"),
        },
        "createInput": {
            "title": required("String!", "Document title"),
            "content": field("String", "Content in markdown"),
            "projectId": field("ID", "Project ID"),
            "icon": field("String", "Icon (emoji)"),
            "color": field("String", "Icon color (hex)"),
        },
        "examples": {
            "list": "linear documents list --project-id xxx",
            "create": "linear documents create --title \"Design notes\"",
        },
    })
}

fn initiatives() -> Value {
    json!({
        "entity": "initiatives",
        "operations": ["list", "get", "create", "update", "delete"],
        "description": "Company-level goals grouping projects",
        "fields": {
            "id": field("ID!", "Unique identifier"),
            "name": field("String!", "Initiative name"),
            "description": field("String", "Initiative description"),
            "status": field("InitiativeStatus!", "Planned, Active or Completed"),
            "targetDate": field("TimelessDate", "Target completion date"),
            "createdAt": field("DateTime!", "Creation timestamp"),
        },
        "createInput": {
            "name": required("String!", "Initiative name"),
            "description": field("String", "Initiative description"),
            "status": field("InitiativeStatus", "Planned, Active or Completed"),
            "targetDate": field("TimelessDate", "Target completion date"),
            "ownerId": field("ID", "Owner user ID"),
        },
        "examples": {
            "list": "linear initiatives list --status Active",
            "create": "linear initiatives create --name \"Q3 platform\"",
        },
    })
}

fn projects() -> Value {
    json!({
        "entity": "projects",
        "operations": ["list"],
        "description": "Projects group related issues together",
        "fields": {
            "id": field("ID!", "Unique identifier"),
            "name": field("String!", "Project name"),
            "description": field("String", "Project description"),
            "state": field("String!", "Project state"),
            "progress": field("Float!", "Completion ratio (0-1)"),
            "url": field("String!", "Linear URL"),
            "targetDate": field("Date", "Project target date"),
        },
        "filters": {
            "state": field("StringComparator", "Filter by state"),
            "accessibleTeams": field("TeamCollectionFilter", "Filter by team"),
        },
    })
}

fn users() -> Value {
    json!({
        "entity": "users",
        "operations": ["list", "me"],
        "description": "Users in the Linear workspace",
        "fields": {
            "id": field("ID!", "Unique identifier"),
            "name": field("String!", "User name"),
            "email": field("String!", "User email"),
            "displayName": field("String!", "Display name"),
            "active": field("Boolean!", "Whether user is active"),
            "admin": field("Boolean!", "Whether user is an admin"),
        },
        "filters": {
            "active": field("BooleanComparator", "Filter by active flag"),
        },
    })
}

fn labels() -> Value {
    json!({
        "entity": "labels",
        "operations": ["list"],
        "description": "Labels for categorizing issues",
        "fields": {
            "id": field("ID!", "Unique identifier"),
            "name": field("String!", "Label name"),
            "color": field("String!", "Label color"),
            "description": field("String", "Label description"),
            "isGroup": field("Boolean!", "Whether the label groups other labels"),
        },
    })
}

fn states() -> Value {
    json!({
        "entity": "states",
        "operations": ["list"],
        "description": "Workflow states issues move through, per team",
        "fields": {
            "id": field("ID!", "Unique identifier"),
            "name": field("String!", "State name"),
            "color": field("String!", "State color"),
            "type": field("String!", "backlog, unstarted, started, completed or canceled"),
            "position": field("Float!", "Order within the team workflow"),
        },
    })
}

fn catalogue() -> Vec<(&'static str, Value)> {
    vec![
        ("issues", issues()),
        ("comments", comments()),
        ("documents", documents()),
        ("initiatives", initiatives()),
        ("projects", projects()),
        ("users", users()),
        ("labels", labels()),
        ("states", states()),
    ]
}

/// Names of every described entity.
pub fn entity_names() -> Vec<&'static str> {
    catalogue().into_iter().map(|(name, _)| name).collect()
}

/// `linear schema [ENTITY] [--full] [--include-examples]`.
pub fn describe(
    entity: Option<&str>,
    full: bool,
    include_examples: bool,
) -> Result<ResponseEnvelope, CliError> {
    if full {
        let schemas: Map<String, Value> = catalogue()
            .into_iter()
            .map(|(name, schema)| (name.to_string(), schema))
            .collect();
        return Ok(build_success(json!({
            "entities": entity_names(),
            "schemas": schemas,
        })));
    }

    if let Some(requested) = entity {
        let wanted = requested.to_lowercase();
        let mut schema = catalogue()
            .into_iter()
            .find(|(name, _)| *name == wanted)
            .map(|(_, schema)| schema)
            .ok_or_else(|| {
                let mut details = Map::new();
                details.insert("availableEntities".to_string(), json!(entity_names()));
                CliError::not_found(format!("Unknown entity: {}", requested)).with_details(details)
            })?;
        if !include_examples {
            if let Value::Object(fields) = &mut schema {
                fields.remove("examples");
            }
        }
        return Ok(build_success(schema));
    }

    let entities: Vec<Value> = catalogue()
        .into_iter()
        .map(|(name, schema)| {
            json!({
                "name": name,
                "description": schema["description"],
                "operations": schema["operations"],
            })
        })
        .collect();
    Ok(build_success(json!({
        "entities": entities,
        "usage": "Use \"linear schema <entity>\" for detailed schema",
        "fullSchema": "Use \"linear schema --full\" for complete schema",
    })))
}
