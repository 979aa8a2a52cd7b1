use std::sync::Arc;

use log::{error, info};
use playground_pipelines::HubClient;
use tauri::State;

use crate::config::{self, AppConfig, ConfigKey, ConfigStore};
use crate::error::Error;
use crate::keychain;

// ===== GENERAL APP CONFIGURATION COMMANDS =====

/// Load the entire app configuration
#[tauri::command]
#[specta::specta]
pub fn load_app_config(config_store: State<config::Config>) -> Result<AppConfig, String> {
    Ok(config_store.app_config())
}

/// Validate, persist and apply new settings. Pipelines already loaded keep
/// the endpoints they were created with until the next load.
#[tauri::command]
#[specta::specta]
pub fn save_app_config(
    config_store: State<config::Config>,
    backend: State<Arc<HubClient>>,
    config: AppConfig,
) -> Result<(), String> {
    apply_app_config(&config_store, &backend, config).map_err(|e| {
        error!("Failed to save app config: {}", e);
        e.into()
    })
}

fn apply_app_config(
    config_store: &config::Config,
    backend: &HubClient,
    config: AppConfig,
) -> Result<(), Error> {
    config.validate().map_err(Error::InvalidConfig)?;

    let token = keychain::load_hub_token()?;
    backend.reconfigure(config.hub_config(token))?;

    config_store
        .set(&ConfigKey::APP, config)
        .map_err(Error::Store)
}

/// Forget stored settings and reconnect with the defaults. The hub token is kept.
#[tauri::command]
#[specta::specta]
pub fn reset_app_config(
    config_store: State<config::Config>,
    backend: State<Arc<HubClient>>,
) -> Result<AppConfig, String> {
    reset(&config_store, &backend).map_err(|e| {
        error!("Failed to reset app config: {}", e);
        e.into()
    })
}

fn reset(config_store: &config::Config, backend: &HubClient) -> Result<AppConfig, Error> {
    config_store.delete(&ConfigKey::APP).map_err(Error::Store)?;

    let config = AppConfig::default();
    backend.reconfigure(config.hub_config(keychain::load_hub_token()?))?;
    info!("App config reset to defaults");
    Ok(config)
}
