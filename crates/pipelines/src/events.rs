//! State change notifications pushed by [`crate::Playground`].
//!
//! The desktop shell forwards these to the webview; tests read them straight
//! off the channel.

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use crate::task::Task;

pub type EventSender = mpsc::UnboundedSender<PlaygroundEvent>;
pub type EventReceiver = mpsc::UnboundedReceiver<PlaygroundEvent>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum PlaygroundEvent {
    /// A pipeline load began; status is Loading(0) and output is cleared
    LoadStarted { task: Task },
    /// Loading percentage increased
    LoadProgress { task: Task, progress: u8 },
    /// Pipeline is ready
    LoadComplete { task: Task },
    /// Pipeline construction failed
    LoadFailed { task: Task, error: String },
    /// In-flight load was abandoned by the user
    LoadCancelled { task: Task },
    /// Pipeline invocation started; output is cleared
    RunStarted { task: Task },
    /// Output text is available
    RunComplete { task: Task, output: String },
    /// Input was rejected before calling the pipeline
    RunRejected { task: Task, hint: String },
    /// Pipeline invocation failed
    RunFailed { task: Task, error: String },
}

/// Channel pair for wiring a playground to a listener.
pub fn channel() -> (EventSender, EventReceiver) {
    mpsc::unbounded_channel()
}
