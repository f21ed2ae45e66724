//! `me` / `whoami`

use super::CommandResult;
use crate::api::types::Viewer;
use crate::api::LinearApi;
use crate::envelope::build_success;
use serde_json::{json, Value};

pub(crate) fn viewer_data(viewer: Viewer) -> Value {
    json!({
        "id": viewer.id,
        "name": viewer.name,
        "email": viewer.email,
        "displayName": viewer.display_name,
        "active": viewer.active,
        "admin": viewer.admin,
        "timezone": viewer.timezone,
        "createdAt": viewer.created_at,
        "organization": viewer.organization.map(|o| json!({
            "id": o.id,
            "name": o.name,
            "urlKey": o.url_key,
        })),
        "teams": viewer
            .teams
            .nodes
            .into_iter()
            .map(|t| json!({ "id": t.id, "key": t.key, "name": t.name }))
            .collect::<Vec<_>>(),
    })
}

pub async fn me(api: &dyn LinearApi) -> CommandResult {
    let viewer = api.viewer().await?;
    Ok(build_success(viewer_data(viewer)))
}
