//! Contract with the inference backend.
//!
//! The backend owns tokenization, weights and execution. The playground only
//! asks it for a pipeline per task and calls that pipeline with a typed
//! request, receiving the backend's raw JSON result.

use std::sync::Arc;

use futures_util::future::BoxFuture;
use serde_json::Value;

use crate::error::PipelineError;
use crate::progress::ProgressCallback;
use crate::request::PipelineRequest;
use crate::task::Task;

/// A callable pipeline for one task and one model.
pub trait Pipeline: Send + Sync {
    /// Task this pipeline was built for
    fn task(&self) -> Task;

    /// Run inference. The result shape depends on the task; see
    /// [`crate::PipelineOutput::decode`].
    fn call(&self, request: PipelineRequest) -> BoxFuture<'_, Result<Value, PipelineError>>;
}

/// Produces pipelines on request.
///
/// Implementations report preparation progress through `progress` and may be
/// dropped mid-flight when the caller loses interest in the result.
pub trait PipelineFactory: Send + Sync {
    fn create(
        &self,
        task: Task,
        model_id: &str,
        progress: ProgressCallback,
    ) -> BoxFuture<'_, Result<Arc<dyn Pipeline>, PipelineError>>;
}
