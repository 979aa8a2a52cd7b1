//! State and control logic for the AI model playground.
//!
//! A [`Playground`] holds one session: the selected [`Task`], the
//! [`ModelStatus`] of its pipeline, the user's input and the formatted output.
//! Pipelines come from a [`PipelineFactory`]; [`HubClient`] is the production
//! backend, tests plug in scripted ones.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use playground_pipelines::{HubClient, HubConfig, Playground, Task};
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let backend = Arc::new(HubClient::new(HubConfig::default())?);
//! let playground = Playground::new(backend);
//!
//! playground.select_task(Task::SentimentAnalysis).await?;
//! let outcome = playground.run_with_input("I love this!").await;
//! println!("{:?}: {}", outcome, playground.output());
//! # Ok(())
//! # }
//! ```

mod error;
pub mod events;
mod hub;
mod output;
mod pipeline;
mod progress;
mod request;
mod session;
mod status;
mod task;
mod view;

pub use error::{DecodeError, InputError, LoadError, PipelineError, RunError};
pub use events::PlaygroundEvent;
pub use hub::{
    api_error_message, hub_pipeline_tag, HubClient, HubConfig, DEFAULT_HUB_URL,
    DEFAULT_INFERENCE_URL, DEFAULT_TIMEOUT_SECS,
};
pub use output::PipelineOutput;
pub use pipeline::{Pipeline, PipelineFactory};
pub use progress::{no_progress, percent, ProgressCallback, ProgressEvent};
pub use request::{split_question, PipelineRequest, QUESTION_DELIMITER};
pub use session::{LoadOutcome, LoadTicket, Playground, RunOutcome, SessionSnapshot};
pub use status::ModelStatus;
pub use task::{task_catalog, Task, TaskCatalogEntry, TaskParseError};
pub use view::{StatusBanner, ViewState, FEATURES, RUN_LABEL, RUN_LABEL_BUSY};

/// Response headers that put the page shell in a cross-origin isolated
/// context. Mirrored in `src-tauri/tauri.conf.json`.
pub const CROSS_ORIGIN_ISOLATION_HEADERS: [(&str, &str); 2] = [
    ("Cross-Origin-Embedder-Policy", "require-corp"),
    ("Cross-Origin-Opener-Policy", "same-origin"),
];
