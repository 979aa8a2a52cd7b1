use crate::task::Task;

/// Failure reported by an inference backend, either while constructing a
/// pipeline or while running one.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Free-form backend failure; the message is shown verbatim
    #[error("{0}")]
    Backend(String),
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },
    #[error("Model not found: {0}")]
    ModelNotFound(String),
    #[error("Invalid response: {0}")]
    InvalidResponse(#[from] serde_json::Error),
}

/// A pipeline result did not have the shape its task promises.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("Empty {task} result")]
    Empty { task: Task },
    #[error("Unexpected {task} result: {source}")]
    Shape {
        task: Task,
        #[source]
        source: serde_json::Error,
    },
}

/// User input that cannot be turned into a pipeline request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    /// Question answering input is not `question\n---\ncontext`
    #[error("Please format your input as:\nYour question\n---\nThe context to search for the answer")]
    QuestionFormat,
}

/// Pipeline construction for a task failed.
#[derive(Debug, thiserror::Error)]
#[error("{source}")]
pub struct LoadError {
    pub task: Task,
    #[source]
    pub source: PipelineError,
}

/// Running the loaded pipeline failed.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error(transparent)]
    Pipeline(#[from] PipelineError),
    #[error(transparent)]
    Decode(#[from] DecodeError),
}
