//! Hugging Face backend.
//!
//! Pipelines are served by the Hugging Face Inference API. Preparing a
//! pipeline fetches the model manifest from the Hub, which validates the
//! model identifier and drives the progress banner with real byte counts.

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use futures_util::future::BoxFuture;
use futures_util::StreamExt;
use log::{debug, info, warn};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::Value;

use crate::error::PipelineError;
use crate::pipeline::{Pipeline, PipelineFactory};
use crate::progress::{ProgressCallback, ProgressEvent};
use crate::request::PipelineRequest;
use crate::task::Task;

pub const DEFAULT_HUB_URL: &str = "https://huggingface.co";
pub const DEFAULT_INFERENCE_URL: &str = "https://router.huggingface.co/hf-inference/models";
pub const DEFAULT_TIMEOUT_SECS: u32 = 60;

/// Name reported in progress events for the manifest transfer
const MANIFEST_FILE: &str = "manifest.json";
const MAX_PREALLOCATED_BYTES: u64 = 1024 * 1024;

/// Connection settings for the Hub and the inference endpoint.
pub struct HubConfig {
    /// Base URL of the model hub (manifests)
    pub hub_url: String,
    /// Base URL of the inference endpoint; the model id is appended
    pub inference_url: String,
    /// Access token sent as a bearer credential
    pub api_token: Option<SecretString>,
    pub request_timeout: Duration,
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            hub_url: DEFAULT_HUB_URL.into(),
            inference_url: DEFAULT_INFERENCE_URL.into(),
            api_token: None,
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS.into()),
        }
    }
}

impl fmt::Debug for HubConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HubConfig")
            .field("hub_url", &self.hub_url)
            .field("inference_url", &self.inference_url)
            .field(
                "api_token",
                &self.api_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

impl HubConfig {
    fn manifest_url(&self, model_id: &str) -> String {
        format!("{}/api/models/{}", self.hub_url.trim_end_matches('/'), model_id)
    }

    fn inference_url(&self, model_id: &str) -> String {
        format!("{}/{}", self.inference_url.trim_end_matches('/'), model_id)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_token {
            Some(token) => request.bearer_auth(token.expose_secret()),
            None => request,
        }
    }
}

/// Fields of the Hub model manifest the playground cares about.
#[derive(Debug, Deserialize)]
struct ModelManifest {
    id: String,
    pipeline_tag: Option<String>,
}

/// Hub pipeline tag a model must carry to serve `task`.
pub fn hub_pipeline_tag(task: Task) -> &'static str {
    match task {
        Task::SentimentAnalysis => "text-classification",
        other => other.kind(),
    }
}

/// Extract a readable message from an error response body.
///
/// The API answers `{"error": "..."}` or `{"error": ["...", ...]}`; anything
/// else is passed through, falling back to the status reason.
pub fn api_error_message(status: reqwest::StatusCode, body: &str) -> String {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum ErrorField {
        One(String),
        Many(Vec<String>),
    }

    #[derive(Deserialize)]
    struct ErrorBody {
        error: ErrorField,
    }

    match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody {
            error: ErrorField::One(message),
        }) => message,
        Ok(ErrorBody {
            error: ErrorField::Many(messages),
        }) => messages.join("; "),
        Err(_) if !body.trim().is_empty() => body.trim().to_string(),
        Err(_) => status
            .canonical_reason()
            .unwrap_or("Unknown error")
            .to_string(),
    }
}

async fn api_error(response: reqwest::Response) -> PipelineError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    PipelineError::Api {
        status: status.as_u16(),
        message: api_error_message(status, &body),
    }
}

struct Connection {
    http: reqwest::Client,
    config: HubConfig,
}

impl Connection {
    fn new(config: HubConfig) -> Result<Self, PipelineError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .user_agent(concat!("ai-model-playground/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { http, config })
    }
}

/// [`PipelineFactory`] backed by the Hugging Face Hub and Inference API.
pub struct HubClient {
    connection: RwLock<Arc<Connection>>,
}

impl HubClient {
    pub fn new(config: HubConfig) -> Result<Self, PipelineError> {
        info!("Hub backend: {:?}", config);
        Ok(Self {
            connection: RwLock::new(Arc::new(Connection::new(config)?)),
        })
    }

    /// Swap connection settings. Pipelines created earlier keep the old ones.
    pub fn reconfigure(&self, config: HubConfig) -> Result<(), PipelineError> {
        info!("Reconfiguring hub backend: {:?}", config);
        let connection = Arc::new(Connection::new(config)?);
        *self
            .connection
            .write()
            .unwrap_or_else(PoisonError::into_inner) = connection;
        Ok(())
    }

    fn connection(&self) -> Arc<Connection> {
        self.connection
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Download the model manifest, reporting byte progress.
    async fn fetch_manifest(
        connection: &Connection,
        model_id: &str,
        progress: &ProgressCallback,
    ) -> Result<ModelManifest, PipelineError> {
        let url = connection.config.manifest_url(model_id);
        debug!("Fetching manifest: {}", url);

        let response = connection
            .config
            .authorize(connection.http.get(&url))
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(PipelineError::ModelNotFound(model_id.to_string()));
        }
        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        let total = response.content_length().unwrap_or(0);
        progress(ProgressEvent::Download {
            model: model_id.to_string(),
            file: MANIFEST_FILE.to_string(),
        });

        let mut body = Vec::with_capacity(total.min(MAX_PREALLOCATED_BYTES) as usize);
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            body.extend_from_slice(&chunk);

            if total > 0 {
                progress(ProgressEvent::Progress {
                    model: model_id.to_string(),
                    file: MANIFEST_FILE.to_string(),
                    loaded: body.len() as u64,
                    total,
                });
            }
        }

        progress(ProgressEvent::Done {
            model: model_id.to_string(),
            file: MANIFEST_FILE.to_string(),
        });

        Ok(serde_json::from_slice(&body)?)
    }
}

impl PipelineFactory for HubClient {
    fn create(
        &self,
        task: Task,
        model_id: &str,
        progress: ProgressCallback,
    ) -> BoxFuture<'_, Result<Arc<dyn Pipeline>, PipelineError>> {
        let model_id = model_id.to_string();
        Box::pin(async move {
            let connection = self.connection();

            progress(ProgressEvent::Initiate {
                model: model_id.clone(),
            });

            let manifest = Self::fetch_manifest(&connection, &model_id, &progress).await?;
            match manifest.pipeline_tag.as_deref() {
                Some(tag) if tag != hub_pipeline_tag(task) => warn!(
                    "Model '{}' is tagged '{}', expected '{}'",
                    manifest.id,
                    tag,
                    hub_pipeline_tag(task)
                ),
                None => debug!("Model '{}' has no pipeline tag", manifest.id),
                _ => {}
            }

            progress(ProgressEvent::Ready {
                model: model_id.clone(),
            });

            Ok(Arc::new(HubPipeline {
                task,
                model_id,
                connection,
            }) as Arc<dyn Pipeline>)
        })
    }
}

/// A pipeline served remotely by the inference endpoint.
struct HubPipeline {
    task: Task,
    model_id: String,
    connection: Arc<Connection>,
}

impl Pipeline for HubPipeline {
    fn task(&self) -> Task {
        self.task
    }

    fn call(&self, request: PipelineRequest) -> BoxFuture<'_, Result<Value, PipelineError>> {
        Box::pin(async move {
            let url = self.connection.config.inference_url(&self.model_id);
            debug!("Calling {} pipeline at {}", self.task, url);

            let response = self
                .connection
                .config
                .authorize(self.connection.http.post(&url))
                .json(&request.to_payload())
                .send()
                .await?;

            if !response.status().is_success() {
                return Err(api_error(response).await);
            }

            Ok(response.json::<Value>().await?)
        })
    }
}
