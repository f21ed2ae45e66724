//! Issue, search and comment presentation.

use super::shared::{cyan_cell, date_cell, priority_cell, single_line, text_or};
use crate::render::{colors, display_value, truncate, ColumnDefinition, RenderOptions};
use serde_json::{json, Value};

pub const ISSUE_COLUMNS: &[ColumnDefinition] = &[
    ColumnDefinition::new("identifier", "ID").format(cyan_cell),
    ColumnDefinition::new("priority", "PRI").format(priority_cell),
    ColumnDefinition::new("title", "TITLE").width(50),
];

pub const COMMENT_COLUMNS: &[ColumnDefinition] = &[
    ColumnDefinition::new("userName", "USER").format(cyan_cell),
    ColumnDefinition::new("body", "COMMENT").format(comment_cell),
    ColumnDefinition::new("createdAt", "DATE").format(comment_date_cell),
];

fn comment_cell(value: &Value, _row: &Value) -> String {
    truncate(&single_line(&display_value(value)), 60)
}

fn comment_date_cell(value: &Value, row: &Value) -> String {
    colors::dim(&date_cell(value, row))
}

pub fn list_options() -> RenderOptions {
    RenderOptions::list(ISSUE_COLUMNS, "identifier")
}

pub fn item_options() -> RenderOptions {
    RenderOptions::item("identifier")
}

/// Condensed view of `issues get` data for table mode.
pub fn get_options(data: &Value) -> RenderOptions {
    item_options().with_summary(issue_summary(data))
}

pub fn comment_list_options() -> RenderOptions {
    RenderOptions::list(COMMENT_COLUMNS, "userName")
}

/// `comments add` result: plain prints the comment id.
pub fn comment_options(data: &Value) -> RenderOptions {
    RenderOptions::item("id").with_summary(json!({
        "id": data["id"],
        "issue": data["issue"]["identifier"],
        "user": text_or(data["user"].get("name"), "Unknown"),
        "body": data["body"],
        "createdAt": data["createdAt"],
    }))
}

fn issue_summary(data: &Value) -> Value {
    let labels = data["labels"]
        .as_array()
        .map(|labels| {
            labels
                .iter()
                .filter_map(|label| label["name"].as_str())
                .collect::<Vec<_>>()
                .join(", ")
        })
        .unwrap_or_default();
    let labels = if labels.is_empty() {
        "None".to_string()
    } else {
        labels
    };
    json!({
        "identifier": data["identifier"],
        "title": data["title"],
        "state": text_or(data["state"].get("name"), "N/A"),
        "priority": data["priorityLabel"],
        "team": text_or(data["team"].get("key"), "N/A"),
        "assignee": text_or(data["assignee"].get("name"), "Unassigned"),
        "labels": labels,
        "estimate": text_or(data.get("estimate"), "None"),
        "comments": data["commentsCount"],
        "url": data["url"],
        "createdAt": data["createdAt"],
        "updatedAt": data["updatedAt"],
    })
}
