mod commands;
mod config;
mod error;
mod events;
mod keychain;
mod logging;
mod setup;
mod specta;

/// Write `ui/bindings.ts` without starting the app (debug builds only).
pub fn export_bindings() {
    crate::specta::builder();
}

pub fn run() {
    let specta_builder = crate::specta::builder();

    tauri::Builder::default()
        .plugin(logging::create_plugin().build())
        .plugin(tauri_plugin_store::Builder::new().build())
        .invoke_handler(specta_builder.invoke_handler())
        .setup(move |app| {
            specta_builder.mount_events(app);
            setup::setup_app(app)
        })
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
