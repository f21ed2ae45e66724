//! Viewer and authentication presentation.

use super::shared::text_or;
use crate::render::RenderOptions;
use serde_json::{json, Value};

pub fn me_options(data: &Value) -> RenderOptions {
    RenderOptions::item("email").with_summary(viewer_summary(data))
}

pub fn auth_options() -> RenderOptions {
    RenderOptions::item("message")
}

pub fn auth_status_options() -> RenderOptions {
    RenderOptions::item("authenticated")
}

fn yes_no(value: &Value) -> &'static str {
    if value.as_bool().unwrap_or(false) {
        "Yes"
    } else {
        "No"
    }
}

fn viewer_summary(data: &Value) -> Value {
    let teams = data["teams"]
        .as_array()
        .map(|teams| {
            teams
                .iter()
                .filter_map(|team| team["key"].as_str())
                .collect::<Vec<_>>()
                .join(", ")
        })
        .unwrap_or_default();
    json!({
        "id": data["id"],
        "name": data["name"],
        "email": data["email"],
        "displayName": data["displayName"],
        "active": yes_no(&data["active"]),
        "admin": yes_no(&data["admin"]),
        "timezone": data["timezone"],
        "organization": text_or(data["organization"].get("name"), "N/A"),
        "teams": teams,
    })
}
