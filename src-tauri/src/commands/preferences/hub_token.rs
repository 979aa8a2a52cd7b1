use std::sync::Arc;

use log::error;
use playground_pipelines::HubClient;
use secrecy::SecretString;
use tauri::State;

use crate::config::{self, ConfigStore};
use crate::error::Error;
use crate::keychain;

// ===== HUB TOKEN COMMANDS (never exposes the token) =====

#[tauri::command]
#[specta::specta]
pub fn has_hub_token() -> Result<bool, String> {
    keychain::load_hub_token()
        .map(|token| token.is_some())
        .map_err(|e| {
            let err = format!("Failed to load hub token: {}", e);
            error!("{}", err);
            err
        })
}

#[tauri::command]
#[specta::specta]
pub fn save_hub_token(
    config_store: State<config::Config>,
    backend: State<Arc<HubClient>>,
    token: String,
) -> Result<(), String> {
    let token = token.trim();
    if token.is_empty() {
        return Err("Hub token cannot be empty".to_string());
    }
    let token = SecretString::from(token.to_string());

    keychain::save_hub_token(&token)
        .map_err(Error::from)
        .and_then(|()| reconnect(&config_store, &backend, Some(token)))
        .map_err(|e| {
            let err = format!("Failed to save hub token: {}", e);
            error!("{}", err);
            err
        })
}

#[tauri::command]
#[specta::specta]
pub fn delete_hub_token(
    config_store: State<config::Config>,
    backend: State<Arc<HubClient>>,
) -> Result<(), String> {
    keychain::delete_hub_token()
        .map_err(Error::from)
        .and_then(|()| reconnect(&config_store, &backend, None))
        .map_err(|e| {
            let err = format!("Failed to delete hub token: {}", e);
            error!("{}", err);
            err
        })
}

/// Rebuild the backend connection with the stored settings and `token`.
fn reconnect(
    config_store: &config::Config,
    backend: &HubClient,
    token: Option<SecretString>,
) -> Result<(), Error> {
    let config = config_store.app_config();
    backend.reconfigure(config.hub_config(token))?;
    Ok(())
}
