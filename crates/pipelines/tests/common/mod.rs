//! Scripted in-memory backend for driving a `Playground` without a network.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use futures_util::future::BoxFuture;
use playground_pipelines::{
    Pipeline, PipelineError, PipelineFactory, PipelineRequest, ProgressCallback, ProgressEvent,
    Task,
};
use serde_json::{json, Value};
use tokio::sync::{oneshot, Notify};

#[derive(Clone)]
pub enum Reply {
    Value(Value),
    Error(String),
}

fn default_reply(task: Task) -> Reply {
    Reply::Value(match task {
        Task::SentimentAnalysis => json!([{"label": "POSITIVE", "score": 0.9987}]),
        Task::Summarization => json!([{"summary_text": "A short summary."}]),
        Task::QuestionAnswering => json!({"answer": "a field of computer science", "score": 0.8}),
        Task::Translation => json!([{"translation_text": "Bonjour le monde"}]),
        Task::TextGeneration => json!([{"generated_text": "Once upon a time there was"}]),
    })
}

struct ScriptedPipeline {
    task: Task,
    reply: Reply,
    gate: Option<Arc<Notify>>,
    calls: Arc<AtomicUsize>,
    last_request: Arc<Mutex<Option<PipelineRequest>>>,
}

impl Pipeline for ScriptedPipeline {
    fn task(&self) -> Task {
        self.task
    }

    fn call(&self, request: PipelineRequest) -> BoxFuture<'_, Result<Value, PipelineError>> {
        Box::pin(async move {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_request.lock().unwrap() = Some(request);

            if let Some(gate) = &self.gate {
                gate.notified().await;
            }

            match &self.reply {
                Reply::Value(value) => Ok(value.clone()),
                Reply::Error(message) => Err(PipelineError::Backend(message.clone())),
            }
        })
    }
}

/// Backend whose load and run behaviour is set up per test.
#[derive(Default)]
pub struct ScriptedFactory {
    replies: HashMap<Task, Reply>,
    load_failures: Mutex<HashMap<Task, String>>,
    load_gates: Mutex<HashMap<Task, oneshot::Receiver<()>>>,
    run_gate: Option<Arc<Notify>>,
    progress: Vec<(u64, u64)>,
    pub loads_started: AtomicUsize,
    pub calls: Arc<AtomicUsize>,
    pub last_request: Arc<Mutex<Option<PipelineRequest>>>,
}

impl ScriptedFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(mut self, task: Task, value: Value) -> Self {
        self.replies.insert(task, Reply::Value(value));
        self
    }

    pub fn reply_error(mut self, task: Task, message: &str) -> Self {
        self.replies.insert(task, Reply::Error(message.to_string()));
        self
    }

    /// Byte counts reported while loading, in order.
    pub fn with_progress(mut self, steps: &[(u64, u64)]) -> Self {
        self.progress = steps.to_vec();
        self
    }

    /// Runs block until the returned handle is notified.
    pub fn gate_runs(&mut self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.run_gate = Some(gate.clone());
        gate
    }

    /// The next load of `task` fails with `message`.
    pub fn fail_next_load(&self, task: Task, message: &str) {
        self.load_failures
            .lock()
            .unwrap()
            .insert(task, message.to_string());
    }

    /// The next load of `task` blocks until the sender fires or is dropped.
    pub fn gate_next_load(&self, task: Task) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.load_gates.lock().unwrap().insert(task, rx);
        tx
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<PipelineRequest> {
        self.last_request.lock().unwrap().clone()
    }
}

impl PipelineFactory for ScriptedFactory {
    fn create(
        &self,
        task: Task,
        model_id: &str,
        progress: ProgressCallback,
    ) -> BoxFuture<'_, Result<Arc<dyn Pipeline>, PipelineError>> {
        let model = model_id.to_string();
        let gate = self.load_gates.lock().unwrap().remove(&task);

        Box::pin(async move {
            self.loads_started.fetch_add(1, Ordering::SeqCst);
            progress(ProgressEvent::Initiate {
                model: model.clone(),
            });

            for &(loaded, total) in &self.progress {
                progress(ProgressEvent::Progress {
                    model: model.clone(),
                    file: "model.onnx".into(),
                    loaded,
                    total,
                });
            }

            if let Some(gate) = gate {
                let _ = gate.await;
            }

            let failure = self.load_failures.lock().unwrap().remove(&task);
            if let Some(message) = failure {
                return Err(PipelineError::Backend(message));
            }

            progress(ProgressEvent::Ready { model });

            Ok(Arc::new(ScriptedPipeline {
                task,
                reply: self
                    .replies
                    .get(&task)
                    .cloned()
                    .unwrap_or_else(|| default_reply(task)),
                gate: self.run_gate.clone(),
                calls: self.calls.clone(),
                last_request: self.last_request.clone(),
            }) as Arc<dyn Pipeline>)
        })
    }
}

/// Yield to other tasks until `condition` holds.
pub async fn wait_until(mut condition: impl FnMut() -> bool) {
    for _ in 0..10_000 {
        if condition() {
            return;
        }
        tokio::task::yield_now().await;
    }
    panic!("condition never became true");
}
