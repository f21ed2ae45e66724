//! Initiative presentation.

use super::shared::{bold_cell, dim_or, text_or};
use crate::render::{colors, display_value, truncate, ColumnDefinition, RenderOptions};
use serde_json::{json, Value};

pub const INITIATIVE_COLUMNS: &[ColumnDefinition] = &[
    ColumnDefinition::new("id", "ID").width(12).format(id_cell),
    ColumnDefinition::new("name", "NAME").width(30).format(bold_cell),
    ColumnDefinition::new("status", "STATUS").format(status_cell),
    ColumnDefinition::new("owner", "OWNER").format(owner_cell),
    ColumnDefinition::new("targetDate", "TARGET").format(target_cell),
    ColumnDefinition::new("projectCount", "PROJECTS"),
    ColumnDefinition::new("progress", "PROGRESS"),
];

fn id_cell(value: &Value, _row: &Value) -> String {
    colors::dim(&display_value(value))
}

fn status_cell(value: &Value, _row: &Value) -> String {
    let status = display_value(value);
    match status.as_str() {
        "Active" => colors::green(&status),
        "Completed" => colors::cyan(&status),
        _ => colors::gray(&status),
    }
}

fn owner_cell(value: &Value, _row: &Value) -> String {
    match value["name"].as_str() {
        Some(name) => truncate(name, 15),
        None => colors::gray("Unassigned"),
    }
}

fn target_cell(value: &Value, _row: &Value) -> String {
    dim_or(value, "None")
}

pub fn list_options() -> RenderOptions {
    RenderOptions::list(INITIATIVE_COLUMNS, "name")
}

pub fn item_options() -> RenderOptions {
    RenderOptions::item("id")
}

pub fn get_options(data: &Value) -> RenderOptions {
    item_options().with_summary(initiative_summary(data))
}

fn initiative_summary(data: &Value) -> Value {
    let description = match data["description"].as_str() {
        Some(text) if !text.is_empty() => {
            format!("{}...", text.chars().take(100).collect::<String>())
        }
        _ => "None".to_string(),
    };
    json!({
        "id": data["id"],
        "name": data["name"],
        "status": data["status"],
        "owner": text_or(data["owner"].get("name"), "Unassigned"),
        "targetDate": text_or(data.get("targetDate"), "None"),
        "projects": data["projects"].as_array().map(Vec::len).unwrap_or(0),
        "description": description,
        "createdAt": data["createdAt"],
    })
}
