//! Render model for the playground window.
//!
//! The page shell is purely presentational: it draws a [`ViewState`] and
//! forwards user actions. Every enable/disable rule lives here.

use serde::{Deserialize, Serialize};

use crate::session::SessionSnapshot;
use crate::status::ModelStatus;
use crate::task::Task;

pub const RUN_LABEL: &str = "Run AI Model";
pub const RUN_LABEL_BUSY: &str = "Processing...";

/// Static callouts listed under the playground.
pub const FEATURES: [&str; 4] = [
    "Five NLP tasks from one window",
    "Models are prepared on demand when you pick a task",
    "Live progress while a model is being prepared",
    "Switch tasks at any time; stale loads are discarded",
];

/// Status banner above the input area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "specta", derive(specta::Type))]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum StatusBanner {
    Loading { progress: u8 },
    Ready { model: String },
    Error { message: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "specta", derive(specta::Type))]
#[serde(rename_all = "camelCase")]
pub struct ViewState {
    pub task: Task,
    pub selector_enabled: bool,
    pub banner: Option<StatusBanner>,
    pub input: String,
    pub input_enabled: bool,
    pub placeholder: String,
    pub run_enabled: bool,
    pub run_label: String,
    /// Present only when there is something to show
    pub output: Option<String>,
    pub features: Vec<String>,
}

impl From<&SessionSnapshot> for ViewState {
    fn from(snapshot: &SessionSnapshot) -> Self {
        let ready = snapshot.status.is_ready();

        let banner = match &snapshot.status {
            ModelStatus::Unloaded => None,
            ModelStatus::Loading { progress } => Some(StatusBanner::Loading {
                progress: *progress,
            }),
            ModelStatus::Ready => Some(StatusBanner::Ready {
                model: snapshot.task.model_id().to_string(),
            }),
            ModelStatus::Failed { message } => Some(StatusBanner::Error {
                message: message.clone(),
            }),
        };

        Self {
            task: snapshot.task,
            selector_enabled: !snapshot.status.is_loading() && !snapshot.processing,
            banner,
            input: snapshot.input.clone(),
            input_enabled: ready && !snapshot.processing,
            placeholder: snapshot.task.placeholder().to_string(),
            run_enabled: ready
                && snapshot.has_pipeline
                && !snapshot.processing
                && !snapshot.input.trim().is_empty(),
            run_label: if snapshot.processing {
                RUN_LABEL_BUSY
            } else {
                RUN_LABEL
            }
            .to_string(),
            output: (!snapshot.output.is_empty()).then(|| snapshot.output.clone()),
            features: FEATURES.iter().map(|f| f.to_string()).collect(),
        }
    }
}
