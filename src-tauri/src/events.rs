//! Typesafe events for the playground window.
//!
//! These mirror [`PlaygroundEvent`] as two discriminated unions the webview
//! can listen to with full type safety via tauri-specta.

use log::warn;
use playground_pipelines::{PlaygroundEvent, Task};
use serde::{Deserialize, Serialize};
use tauri::AppHandle;
use tauri_specta::Event;

/// Model loading state change event - single event stream for all loading state transitions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, specta::Type, tauri_specta::Event)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum ModelLoadingStateChanged {
    #[serde(rename = "started")]
    Started { task: Task },
    /// Percentage went up
    #[serde(rename = "progress")]
    Progress { task: Task, progress: u8 },
    #[serde(rename = "complete")]
    Complete { task: Task },
    #[serde(rename = "error")]
    Error { task: Task, error: String },
    /// Load abandoned by the user
    #[serde(rename = "cancelled")]
    Cancelled { task: Task },
}

/// Pipeline run state change event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, specta::Type, tauri_specta::Event)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum RunStateChanged {
    #[serde(rename = "started")]
    Started { task: Task },
    #[serde(rename = "complete")]
    Complete { task: Task, output: String },
    /// Input didn't match the task's format; `hint` is shown as output
    #[serde(rename = "invalidInput")]
    InvalidInput { task: Task, hint: String },
    #[serde(rename = "error")]
    Error { task: Task, error: String },
}

/// A [`PlaygroundEvent`] in the shape the webview listens for.
#[derive(Debug, Clone, PartialEq)]
pub enum WindowEvent {
    Loading(ModelLoadingStateChanged),
    Run(RunStateChanged),
}

impl From<PlaygroundEvent> for WindowEvent {
    fn from(event: PlaygroundEvent) -> Self {
        use ModelLoadingStateChanged as Load;
        use RunStateChanged as Run;

        match event {
            PlaygroundEvent::LoadStarted { task } => Self::Loading(Load::Started { task }),
            PlaygroundEvent::LoadProgress { task, progress } => {
                Self::Loading(Load::Progress { task, progress })
            }
            PlaygroundEvent::LoadComplete { task } => Self::Loading(Load::Complete { task }),
            PlaygroundEvent::LoadFailed { task, error } => {
                Self::Loading(Load::Error { task, error })
            }
            PlaygroundEvent::LoadCancelled { task } => Self::Loading(Load::Cancelled { task }),
            PlaygroundEvent::RunStarted { task } => Self::Run(Run::Started { task }),
            PlaygroundEvent::RunComplete { task, output } => {
                Self::Run(Run::Complete { task, output })
            }
            PlaygroundEvent::RunRejected { task, hint } => {
                Self::Run(Run::InvalidInput { task, hint })
            }
            PlaygroundEvent::RunFailed { task, error } => Self::Run(Run::Error { task, error }),
        }
    }
}

/// Forward a session event to the webview.
pub fn emit(app: &AppHandle, event: PlaygroundEvent) {
    let result = match WindowEvent::from(event) {
        WindowEvent::Loading(event) => event.emit(app),
        WindowEvent::Run(event) => event.emit(app),
    };

    if let Err(e) = result {
        warn!("Failed to emit playground event: {}", e);
    }
}
