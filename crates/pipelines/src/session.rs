use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use log::{debug, error, info, warn};
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use crate::error::{LoadError, RunError};
use crate::events::{EventSender, PlaygroundEvent};
use crate::output::PipelineOutput;
use crate::pipeline::{Pipeline, PipelineFactory};
use crate::progress::{ProgressCallback, ProgressEvent};
use crate::request::PipelineRequest;
use crate::status::ModelStatus;
use crate::task::Task;
use crate::view::ViewState;

/// Everything the playground window shows, owned in one place.
struct Session {
    task: Task,
    status: ModelStatus,
    pipeline: Option<Arc<dyn Pipeline>>,
    input: String,
    output: String,
    processing: bool,
    /// Bumped on every load; completions carrying an older value are stale
    generation: u64,
    /// Cancels the load issued for `generation`
    cancel: Option<CancellationToken>,
}

impl Session {
    fn can_run(&self) -> bool {
        self.status.is_ready()
            && self.pipeline.is_some()
            && !self.processing
            && !self.input.trim().is_empty()
    }
}

struct Shared {
    session: Mutex<Session>,
    events: Option<EventSender>,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, Session> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Called with the session lock held so listeners see events in state order.
    fn emit(&self, event: PlaygroundEvent) {
        if let Some(events) = &self.events {
            if events.send(event).is_err() {
                debug!("Playground event listener dropped");
            }
        }
    }
}

/// Handle for a load started by [`Playground::begin_load`].
#[derive(Debug)]
pub struct LoadTicket {
    task: Task,
    generation: u64,
    cancel: CancellationToken,
}

impl LoadTicket {
    pub fn task(&self) -> Task {
        self.task
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Pipeline stored, status is Ready
    Ready,
    /// A newer load or a cancellation made this result irrelevant; state untouched
    Superseded,
}

/// What a call to [`Playground::run`] did.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "specta", derive(specta::Type))]
#[serde(tag = "outcome", rename_all = "camelCase")]
pub enum RunOutcome {
    /// Preconditions not met; nothing changed
    Skipped,
    Completed { output: String },
    /// Input rejected before the pipeline was called; output holds the hint
    InvalidInput { hint: String },
    /// Pipeline failed; output holds `"Error: {error}"`
    Failed { error: String },
    /// Task changed while the pipeline was running; result dropped
    Superseded,
}

/// Point-in-time copy of the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "specta", derive(specta::Type))]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub task: Task,
    pub status: ModelStatus,
    pub has_pipeline: bool,
    pub input: String,
    pub output: String,
    pub processing: bool,
}

/// The playground session: selected task, pipeline lifecycle and runs.
///
/// Only one pipeline is held at a time. Selecting a task drops the previous
/// pipeline and cancels any load still in flight, so at most one load can
/// change visible state.
#[derive(Clone)]
pub struct Playground {
    factory: Arc<dyn PipelineFactory>,
    shared: Arc<Shared>,
}

impl Playground {
    pub fn new(factory: Arc<dyn PipelineFactory>) -> Self {
        Self::build(factory, None)
    }

    /// Create a playground that reports every state change on `events`.
    pub fn with_events(factory: Arc<dyn PipelineFactory>, events: EventSender) -> Self {
        Self::build(factory, Some(events))
    }

    fn build(factory: Arc<dyn PipelineFactory>, events: Option<EventSender>) -> Self {
        Self {
            factory,
            shared: Arc::new(Shared {
                session: Mutex::new(Session {
                    task: Task::default(),
                    status: ModelStatus::Unloaded,
                    pipeline: None,
                    input: String::new(),
                    output: String::new(),
                    processing: false,
                    generation: 0,
                    cancel: None,
                }),
                events,
            }),
        }
    }

    pub fn task(&self) -> Task {
        self.shared.lock().task
    }

    pub fn status(&self) -> ModelStatus {
        self.shared.lock().status.clone()
    }

    pub fn output(&self) -> String {
        self.shared.lock().output.clone()
    }

    pub fn is_processing(&self) -> bool {
        self.shared.lock().processing
    }

    /// Ready, pipeline present, not processing and input not blank.
    pub fn can_run(&self) -> bool {
        self.shared.lock().can_run()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let session = self.shared.lock();
        SessionSnapshot {
            task: session.task,
            status: session.status.clone(),
            has_pipeline: session.pipeline.is_some(),
            input: session.input.clone(),
            output: session.output.clone(),
            processing: session.processing,
        }
    }

    pub fn view(&self) -> ViewState {
        ViewState::from(&self.snapshot())
    }

    pub fn set_input(&self, input: impl Into<String>) {
        self.shared.lock().input = input.into();
    }

    /// Switch to `task` and load its pipeline.
    pub async fn select_task(&self, task: Task) -> Result<LoadOutcome, LoadError> {
        let ticket = self.begin_load(task);
        self.complete_load(ticket).await
    }

    /// Load the current task's pipeline again, e.g. after a failure.
    pub async fn reload(&self) -> Result<LoadOutcome, LoadError> {
        self.select_task(self.task()).await
    }

    /// Reset the session for `task`: drop the pipeline, clear output, status
    /// Loading(0), cancel the previous load. No backend work happens here.
    pub fn begin_load(&self, task: Task) -> LoadTicket {
        let cancel = CancellationToken::new();
        let mut session = self.shared.lock();

        if let Some(previous) = session.cancel.replace(cancel.clone()) {
            debug!("Cancelling superseded load for '{}'", session.task);
            previous.cancel();
        }

        session.generation += 1;
        session.task = task;
        session.pipeline = None;
        session.status = ModelStatus::loading();
        session.output.clear();

        debug!(
            ">>> LOAD START: Task '{}' (generation {})",
            task, session.generation
        );
        info!("Loading pipeline for '{}' ({})", task, task.model_id());
        self.shared.emit(PlaygroundEvent::LoadStarted { task });

        LoadTicket {
            task,
            generation: session.generation,
            cancel,
        }
    }

    /// Ask the backend for the ticket's pipeline and apply the result if the
    /// ticket is still current.
    pub async fn complete_load(&self, ticket: LoadTicket) -> Result<LoadOutcome, LoadError> {
        let LoadTicket {
            task,
            generation,
            cancel,
        } = ticket;
        let progress = self.progress_callback(task, generation);

        let created = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!("<<< LOAD ABANDONED: Task '{}' (generation {})", task, generation);
                return Ok(LoadOutcome::Superseded);
            }
            result = self.factory.create(task, task.model_id(), progress) => result,
        };

        let mut session = self.shared.lock();
        if session.generation != generation {
            debug!(
                "<<< LOAD DISCARDED: Task '{}' (generation {}, current {})",
                task, generation, session.generation
            );
            return Ok(LoadOutcome::Superseded);
        }
        session.cancel = None;

        match created {
            Ok(pipeline) => {
                if pipeline.task() != task {
                    warn!(
                        "Backend returned a '{}' pipeline for '{}'",
                        pipeline.task(),
                        task
                    );
                }
                session.pipeline = Some(pipeline);
                session.status = ModelStatus::Ready;
                debug!("<<< LOAD COMPLETE: Task '{}' - pipeline ready", task);
                info!("Pipeline for '{}' loaded successfully", task);
                self.shared.emit(PlaygroundEvent::LoadComplete { task });
                Ok(LoadOutcome::Ready)
            }
            Err(source) => {
                let message = source.to_string();
                error!("Failed to load pipeline for '{}': {}", task, message);
                session.pipeline = None;
                session.status = ModelStatus::Failed {
                    message: message.clone(),
                };
                self.shared.emit(PlaygroundEvent::LoadFailed {
                    task,
                    error: message,
                });
                Err(LoadError { task, source })
            }
        }
    }

    /// Abandon the in-flight load. Returns false if nothing was loading.
    pub fn cancel_load(&self) -> bool {
        let mut session = self.shared.lock();
        if !session.status.is_loading() {
            return false;
        }

        if let Some(token) = session.cancel.take() {
            token.cancel();
        }
        session.generation += 1;
        session.status = ModelStatus::Unloaded;

        let task = session.task;
        info!("Cancelled pipeline load for '{}'", task);
        self.shared.emit(PlaygroundEvent::LoadCancelled { task });
        true
    }

    /// Progress sink bound to one load. Events from stale loads are dropped.
    fn progress_callback(&self, task: Task, generation: u64) -> ProgressCallback {
        let shared = Arc::downgrade(&self.shared);
        Arc::new(move |event: ProgressEvent| {
            let Some(percent) = event.percent() else {
                return;
            };
            let Some(shared) = shared.upgrade() else {
                return;
            };

            let mut session = shared.lock();
            if session.generation == generation && session.status.advance(percent) {
                let progress = session.status.progress();
                shared.emit(PlaygroundEvent::LoadProgress { task, progress });
            }
        })
    }

    /// Replace the input and run the pipeline on it.
    pub async fn run_with_input(&self, input: impl Into<String>) -> RunOutcome {
        self.set_input(input);
        self.run().await
    }

    /// Run the loaded pipeline on the current input and store the formatted
    /// result (or error) as output.
    pub async fn run(&self) -> RunOutcome {
        let (task, generation, pipeline, request) = {
            let mut session = self.shared.lock();
            if !session.can_run() {
                return RunOutcome::Skipped;
            }
            let Some(pipeline) = session.pipeline.clone() else {
                return RunOutcome::Skipped;
            };

            session.processing = true;
            session.output.clear();
            let task = session.task;

            match PipelineRequest::from_input(task, &session.input) {
                Ok(request) => {
                    self.shared.emit(PlaygroundEvent::RunStarted { task });
                    (task, session.generation, pipeline, request)
                }
                Err(err) => {
                    let hint = err.to_string();
                    debug!("Rejected '{}' input: {}", task, hint);
                    session.output = hint.clone();
                    session.processing = false;
                    self.shared.emit(PlaygroundEvent::RunRejected {
                        task,
                        hint: hint.clone(),
                    });
                    return RunOutcome::InvalidInput { hint };
                }
            }
        };

        debug!(">>> RUN START: Task '{}'", task);
        let result: Result<PipelineOutput, RunError> = match pipeline.call(request).await {
            Ok(value) => PipelineOutput::decode(task, value).map_err(RunError::from),
            Err(err) => Err(err.into()),
        };

        let mut session = self.shared.lock();
        session.processing = false;
        if session.generation != generation {
            debug!("<<< RUN DISCARDED: Task '{}' was replaced", task);
            return RunOutcome::Superseded;
        }

        match result {
            Ok(output) => {
                let output = output.to_string();
                debug!("<<< RUN COMPLETE: Task '{}' ({} chars)", task, output.len());
                session.output = output.clone();
                self.shared.emit(PlaygroundEvent::RunComplete {
                    task,
                    output: output.clone(),
                });
                RunOutcome::Completed { output }
            }
            Err(err) => {
                let error = err.to_string();
                warn!("Pipeline run for '{}' failed: {}", task, error);
                session.output = format!("Error: {}", error);
                self.shared.emit(PlaygroundEvent::RunFailed {
                    task,
                    error: error.clone(),
                });
                RunOutcome::Failed { error }
            }
        }
    }
}
