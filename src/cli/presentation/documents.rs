//! Document presentation.

use super::shared::{bold_cell, date_cell, dim_or, text_or};
use crate::render::{colors, ColumnDefinition, RenderOptions};
use serde_json::{json, Value};

pub const DOCUMENT_COLUMNS: &[ColumnDefinition] = &[
    ColumnDefinition::new("title", "TITLE").width(40).format(bold_cell),
    ColumnDefinition::new("projectName", "PROJECT")
        .width(20)
        .format(project_cell),
    ColumnDefinition::new("creatorName", "CREATOR").format(creator_cell),
    ColumnDefinition::new("updatedAt", "UPDATED").format(date_cell),
];

fn project_cell(value: &Value, _row: &Value) -> String {
    match value.as_str() {
        Some(name) if !name.is_empty() => colors::cyan(name),
        _ => colors::gray("None"),
    }
}

fn creator_cell(value: &Value, _row: &Value) -> String {
    dim_or(value, "Unknown")
}

pub fn list_options() -> RenderOptions {
    RenderOptions::list(DOCUMENT_COLUMNS, "title")
}

pub fn item_options() -> RenderOptions {
    RenderOptions::item("id")
}

pub fn get_options(data: &Value) -> RenderOptions {
    item_options().with_summary(document_summary(data))
}

/// First 100 characters of content, marked as cut.
fn content_preview(content: Option<&str>) -> String {
    match content {
        Some(text) if !text.is_empty() => {
            let head: String = text.chars().take(100).collect();
            format!("{}...", head)
        }
        _ => "Empty".to_string(),
    }
}

fn document_summary(data: &Value) -> Value {
    json!({
        "id": data["id"],
        "title": data["title"],
        "project": text_or(data["project"].get("name"), "None"),
        "creator": text_or(data["creator"].get("name"), "Unknown"),
        "content": content_preview(data["content"].as_str()),
        "createdAt": data["createdAt"],
        "updatedAt": data["updatedAt"],
    })
}
