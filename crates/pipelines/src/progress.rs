use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Progress report emitted by a backend while it prepares a pipeline.
///
/// Only `Progress` carries byte counts; the other kinds mark phase boundaries
/// and are ignored by the loader.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ProgressEvent {
    /// Backend started preparing the model
    Initiate { model: String },
    /// A file transfer started
    Download { model: String, file: String },
    /// Bytes received so far for the current file
    Progress {
        model: String,
        file: String,
        loaded: u64,
        total: u64,
    },
    /// A file transfer finished
    Done { model: String, file: String },
    /// Pipeline constructed
    Ready { model: String },
}

impl ProgressEvent {
    /// Percentage represented by this event, if it is a `Progress` event.
    pub fn percent(&self) -> Option<u8> {
        match self {
            Self::Progress { loaded, total, .. } => percent(*loaded, *total),
            _ => None,
        }
    }
}

/// Callback handed to a backend for progress reporting.
pub type ProgressCallback = Arc<dyn Fn(ProgressEvent) + Send + Sync>;

/// A callback that drops every event.
pub fn no_progress() -> ProgressCallback {
    Arc::new(|_| {})
}

/// `round(loaded / total * 100)` clamped to 0..=100. `None` when `total` is zero.
pub fn percent(loaded: u64, total: u64) -> Option<u8> {
    if total == 0 {
        return None;
    }
    let ratio = (loaded as f64 / total as f64) * 100.0;
    Some(ratio.round().clamp(0.0, 100.0) as u8)
}
