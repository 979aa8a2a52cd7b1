use log::{error, info};
use playground_pipelines::{
    task_catalog, LoadOutcome, Playground, RunOutcome, Task, TaskCatalogEntry, ViewState,
};
use tauri::State;

// ===== CATALOG AND VIEW =====

#[tauri::command]
#[specta::specta]
pub fn get_task_catalog() -> Vec<TaskCatalogEntry> {
    task_catalog()
}

/// Everything the window needs to draw itself
#[tauri::command]
#[specta::specta]
pub fn get_view_state(playground: State<Playground>) -> ViewState {
    playground.view()
}

// ===== MODEL LIFECYCLE =====

/// Switch task and load its pipeline. Resolves once the load settles;
/// progress arrives as `ModelLoadingStateChanged` events meanwhile.
#[tauri::command]
#[specta::specta]
pub async fn select_task(playground: State<'_, Playground>, task: Task) -> Result<(), String> {
    info!("Task selected: {}", task);

    match playground.select_task(task).await {
        Ok(LoadOutcome::Ready | LoadOutcome::Superseded) => Ok(()),
        Err(e) => {
            error!("Failed to load {}: {}", task, e);
            Err(e.to_string())
        }
    }
}

/// Retry the current task, typically after a failed load
#[tauri::command]
#[specta::specta]
pub async fn reload_model(playground: State<'_, Playground>) -> Result<(), String> {
    playground
        .reload()
        .await
        .map(|_| ())
        .map_err(|e| e.to_string())
}

/// Returns false when nothing was loading
#[tauri::command]
#[specta::specta]
pub fn cancel_model_load(playground: State<Playground>) -> bool {
    playground.cancel_load()
}

// ===== RUNNING =====

#[tauri::command]
#[specta::specta]
pub fn set_input(playground: State<Playground>, input: String) {
    playground.set_input(input);
}

/// Run the loaded pipeline on `input`, which replaces the stored input first
/// so a click right after typing never sees stale text.
#[tauri::command]
#[specta::specta]
pub async fn run_model(
    playground: State<'_, Playground>,
    input: String,
) -> Result<RunOutcome, String> {
    Ok(playground.run_with_input(input).await)
}
