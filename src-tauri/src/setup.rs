use std::sync::Arc;

use log::{error, info, warn};
use playground_pipelines::{events, HubClient, LoadOutcome, Playground};
use tauri::Manager;
use tauri_plugin_store::StoreExt;

use crate::config::{self, ConfigStore};
use crate::keychain;

pub fn setup_app(app: &mut tauri::App<tauri::Wry>) -> Result<(), Box<dyn std::error::Error>> {
    info!("AI Model Playground v{}", env!("CARGO_PKG_VERSION"));

    let store = app.store(config::STORE_FILE)?;
    let config_store = config::Config::new(store);
    let app_config = config_store.app_config();

    // A broken keychain shouldn't keep the playground from starting
    let hub_token = keychain::load_hub_token().unwrap_or_else(|e| {
        warn!("Hub token unavailable, continuing anonymously: {}", e);
        None
    });

    let backend = Arc::new(HubClient::new(app_config.hub_config(hub_token))?);

    let (events_tx, mut events_rx) = events::channel();
    let playground = Playground::with_events(backend.clone(), events_tx);

    app.manage(config_store);
    app.manage(backend);
    app.manage(playground.clone());

    // Session events → webview
    let app_handle = app.app_handle().clone();
    tauri::async_runtime::spawn(async move {
        while let Some(event) = events_rx.recv().await {
            crate::events::emit(&app_handle, event);
        }
    });

    // Load the initial task in background to not block app startup
    let default_task = app_config.default_task;
    info!("Loading initial task: {}", default_task);
    tauri::async_runtime::spawn(async move {
        match playground.select_task(default_task).await {
            Ok(LoadOutcome::Ready) => {}
            Ok(LoadOutcome::Superseded) => info!("Initial load superseded by user selection"),
            Err(e) => error!("Failed to load {} on startup: {}", default_task, e),
        }
    });

    Ok(())
}
