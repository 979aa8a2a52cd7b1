//! Model status state machine.
//!
//! State diagram:
//! ```text
//! Unloaded ──begin_load──> Loading(p) ──success──> Ready
//!    ^                        │  │
//!    └──────cancel_load───────┘  └──failure──> Failed(message)
//!
//! Any state ──begin_load──> Loading(0)
//! ```

use serde::{Deserialize, Serialize};

/// Status of the pipeline for the selected task.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "specta", derive(specta::Type))]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum ModelStatus {
    /// No pipeline requested yet, or the last load was cancelled
    #[default]
    Unloaded,
    /// Pipeline is being prepared; progress is a percentage in 0..=100
    Loading { progress: u8 },
    /// Pipeline is ready to run
    Ready,
    /// Pipeline construction failed
    Failed { message: String },
}

impl ModelStatus {
    pub fn loading() -> Self {
        Self::Loading { progress: 0 }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading { .. })
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready)
    }

    /// Percentage to display: 100 once ready, 0 when nothing is in flight.
    pub fn progress(&self) -> u8 {
        match self {
            Self::Loading { progress } => *progress,
            Self::Ready => 100,
            Self::Unloaded | Self::Failed { .. } => 0,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed { message } => Some(message),
            _ => None,
        }
    }

    /// Raise the loading percentage, never lowering it.
    ///
    /// Returns true if the stored value changed. Has no effect outside `Loading`.
    pub fn advance(&mut self, percent: u8) -> bool {
        match self {
            Self::Loading { progress } if percent.min(100) > *progress => {
                *progress = percent.min(100);
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_per_state() {
        assert_eq!(ModelStatus::Unloaded.progress(), 0);
        assert_eq!(ModelStatus::Loading { progress: 42 }.progress(), 42);
        assert_eq!(ModelStatus::Ready.progress(), 100);
        assert_eq!(
            ModelStatus::Failed {
                message: "boom".into()
            }
            .progress(),
            0
        );
    }

    #[test]
    fn test_advance_is_monotonic() {
        let mut status = ModelStatus::loading();
        assert!(status.advance(30));
        assert!(!status.advance(10));
        assert_eq!(status.progress(), 30);
        assert!(status.advance(250));
        assert_eq!(status.progress(), 100);
    }

    #[test]
    fn test_advance_ignored_when_not_loading() {
        let mut status = ModelStatus::Ready;
        assert!(!status.advance(50));
        assert_eq!(status, ModelStatus::Ready);
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(ModelStatus::Loading { progress: 7 }).unwrap();
        assert_eq!(json, serde_json::json!({"state": "loading", "progress": 7}));

        let json = serde_json::to_value(ModelStatus::Failed {
            message: "offline".into(),
        })
        .unwrap();
        assert_eq!(json, serde_json::json!({"state": "failed", "message": "offline"}));
    }
}
