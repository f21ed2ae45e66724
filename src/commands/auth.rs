//! `auth login|logout|status`

use super::CommandResult;
use crate::api::types::Viewer;
use crate::api::ApiConnector;
use crate::classify::Failure;
use crate::config::CredentialStore;
use crate::envelope::build_success;
use crate::error::CliError;
use serde_json::{json, Map, Value};
use tracing::info;

/// Where API keys are created.
pub const API_SETTINGS_URL: &str = "https://linear.app/settings/api";

fn user_data(viewer: &Viewer) -> Value {
    json!({ "id": viewer.id, "name": viewer.name, "email": viewer.email })
}

fn config_path(store: &CredentialStore) -> String {
    store.config_path().display().to_string()
}

/// `MISSING_REQUIRED_FIELD` pointing at the key settings page.
pub fn missing_key_error() -> CliError {
    let mut details = Map::new();
    details.insert("url".to_string(), json!(API_SETTINGS_URL));
    CliError::missing_field(
        "No API key provided. Pass it as an argument, with --key, or set LINEAR_API_KEY.",
    )
    .with_details(details)
}

/// Validate `key` against the API, then store it.
pub async fn login(
    store: &CredentialStore,
    connector: &dyn ApiConnector,
    key: Option<&str>,
) -> CommandResult {
    let key = key
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .ok_or_else(missing_key_error)?;

    let api = connector.connect(key)?;
    let viewer = api.viewer().await?;
    store.save_api_key(key)?;
    info!(user = %viewer.email, "API key saved");

    Ok(build_success(json!({
        "message": "Successfully authenticated",
        "user": user_data(&viewer),
        "configPath": config_path(store),
    })))
}

pub fn logout(store: &CredentialStore) -> CommandResult {
    if store.get_api_key()?.is_none() {
        return Err(Failure::from(CliError::not_authenticated(
            "Not currently authenticated",
        )));
    }
    store.remove_api_key()?;
    Ok(build_success(json!({
        "message": "Successfully logged out",
        "configPath": config_path(store),
    })))
}

/// Report whether a key is configured and, if so, whether it still works.
pub async fn status(store: &CredentialStore, connector: &dyn ApiConnector) -> CommandResult {
    let (key, source) = match (store.get_api_key()?, store.source()?) {
        (Some(key), Some(source)) => (key, source),
        _ => {
            return Ok(build_success(json!({
                "authenticated": false,
                "message": "Not authenticated",
                "configPath": config_path(store),
            })))
        }
    };

    let api = connector.connect(&key)?;
    let viewer = api.viewer().await?;
    Ok(build_success(json!({
        "authenticated": true,
        "user": user_data(&viewer),
        "source": source,
        "configPath": config_path(store),
    })))
}
