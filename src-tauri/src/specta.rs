use tauri_specta::{collect_events, Builder};

use crate::events::{ModelLoadingStateChanged, RunStateChanged};

/// Generated bindings, next to the page shell
#[cfg(debug_assertions)]
const BINDINGS_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../ui/bindings.ts");

/// Command and event registry shared by the invoke handler and the
/// TypeScript exporter.
pub fn builder() -> Builder<tauri::Wry> {
    let builder = Builder::<tauri::Wry>::new()
        .commands(crate::with_commands!(tauri_specta::collect_commands))
        .events(collect_events![ModelLoadingStateChanged, RunStateChanged]);

    #[cfg(debug_assertions)]
    if let Err(e) = builder.export(specta_typescript::Typescript::default(), BINDINGS_PATH) {
        // The log plugin isn't installed yet
        eprintln!("Failed to export TypeScript bindings: {}", e);
    }

    builder
}
