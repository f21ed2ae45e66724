//! Projects, users, labels and workflow states.

use super::shared::{bold_cell, cyan_cell, dim_cell, dim_or, progress_cell};
use crate::render::{colors, display_value, ColumnDefinition, RenderOptions};
use serde_json::Value;

pub const PROJECT_COLUMNS: &[ColumnDefinition] = &[
    ColumnDefinition::new("name", "NAME").width(30).format(bold_cell),
    ColumnDefinition::new("state", "STATE").format(project_state_cell),
    ColumnDefinition::new("progress", "PROGRESS").format(progress_cell),
    ColumnDefinition::new("targetDate", "TARGET").format(target_cell),
];

pub const USER_COLUMNS: &[ColumnDefinition] = &[
    ColumnDefinition::new("name", "NAME").format(bold_cell),
    ColumnDefinition::new("email", "EMAIL").format(dim_cell),
    ColumnDefinition::new("active", "ACTIVE").format(active_cell),
    ColumnDefinition::new("admin", "ADMIN").format(admin_cell),
];

pub const LABEL_COLUMNS: &[ColumnDefinition] = &[
    ColumnDefinition::new("name", "NAME").format(label_name_cell),
    ColumnDefinition::new("color", "COLOR").format(dim_cell),
    ColumnDefinition::new("description", "DESCRIPTION").width(40),
];

pub const STATE_COLUMNS: &[ColumnDefinition] = &[
    ColumnDefinition::new("teamKey", "TEAM").format(cyan_cell),
    ColumnDefinition::new("name", "NAME").format(bold_cell),
    ColumnDefinition::new("type", "TYPE").format(state_type_cell),
    ColumnDefinition::new("color", "COLOR").format(dim_cell),
];

fn project_state_cell(value: &Value, _row: &Value) -> String {
    let state = display_value(value);
    match state.as_str() {
        "planned" => colors::blue(&state),
        "started" => colors::yellow(&state),
        "paused" => colors::gray(&state),
        "completed" => colors::green(&state),
        "canceled" => colors::red(&state),
        _ => state,
    }
}

fn target_cell(value: &Value, _row: &Value) -> String {
    dim_or(value, "No date")
}

fn active_cell(value: &Value, _row: &Value) -> String {
    if value.as_bool().unwrap_or(false) {
        colors::green("Yes")
    } else {
        colors::red("No")
    }
}

fn admin_cell(value: &Value, _row: &Value) -> String {
    if value.as_bool().unwrap_or(false) {
        colors::yellow("Yes")
    } else {
        colors::gray("No")
    }
}

fn label_name_cell(value: &Value, row: &Value) -> String {
    let name = colors::bold(&display_value(value));
    if row["isGroup"].as_bool().unwrap_or(false) {
        format!("{}{}", name, colors::dim(" (group)"))
    } else {
        name
    }
}

fn state_type_cell(value: &Value, _row: &Value) -> String {
    let state_type = display_value(value);
    match state_type.as_str() {
        "backlog" => colors::gray(&state_type),
        "unstarted" => colors::blue(&state_type),
        "started" => colors::yellow(&state_type),
        "completed" => colors::green(&state_type),
        "canceled" => colors::red(&state_type),
        _ => state_type,
    }
}

pub fn project_options() -> RenderOptions {
    RenderOptions::list(PROJECT_COLUMNS, "name")
}

pub fn user_options() -> RenderOptions {
    RenderOptions::list(USER_COLUMNS, "name")
}

pub fn label_options() -> RenderOptions {
    RenderOptions::list(LABEL_COLUMNS, "name")
}

pub fn state_options() -> RenderOptions {
    RenderOptions::list(STATE_COLUMNS, "name")
}
