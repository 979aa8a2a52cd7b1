use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Duration;

use log::warn;
use playground_pipelines::{HubConfig, Task, DEFAULT_HUB_URL, DEFAULT_INFERENCE_URL, DEFAULT_TIMEOUT_SECS};
use secrecy::SecretString;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tauri_plugin_store::Store;

/// File name of the local settings store
pub const STORE_FILE: &str = "config.json";

pub const MIN_REQUEST_TIMEOUT_SECS: u32 = 5;
pub const MAX_REQUEST_TIMEOUT_SECS: u32 = 600;

/// Type-safe configuration key that associates a key name with its value type
#[derive(Debug, Clone, Copy)]
pub struct ConfigKey<T> {
    name: &'static str,
    _phantom: PhantomData<T>,
}

impl<T> ConfigKey<T> {
    const fn new(name: &'static str) -> Self {
        Self {
            name,
            _phantom: PhantomData,
        }
    }

    pub fn key_name(&self) -> &'static str {
        self.name
    }
}

// ===== App Configuration =====

fn default_hub_url() -> String {
    DEFAULT_HUB_URL.to_string()
}

fn default_inference_url() -> String {
    DEFAULT_INFERENCE_URL.to_string()
}

fn default_request_timeout_secs() -> u32 {
    DEFAULT_TIMEOUT_SECS
}

/// App configuration (stored locally). The hub token lives in the keychain.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, specta::Type)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    /// Task selected and loaded at startup
    #[serde(default)]
    pub default_task: Task,
    #[serde(default = "default_hub_url")]
    pub hub_url: String,
    #[serde(default = "default_inference_url")]
    pub inference_url: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_task: Task::default(),
            hub_url: default_hub_url(),
            inference_url: default_inference_url(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl ConfigKey<AppConfig> {
    pub const APP: Self = Self::new("appConfig");
}

impl AppConfig {
    /// Reject settings the backend could not work with.
    pub fn validate(&self) -> Result<(), String> {
        for (name, url) in [("Hub URL", &self.hub_url), ("Inference URL", &self.inference_url)] {
            let url = url.trim();
            if url.is_empty() {
                return Err(format!("{} cannot be empty", name));
            }
            if !(url.starts_with("https://") || url.starts_with("http://")) {
                return Err(format!("{} must start with http:// or https://", name));
            }
        }

        if !(MIN_REQUEST_TIMEOUT_SECS..=MAX_REQUEST_TIMEOUT_SECS).contains(&self.request_timeout_secs)
        {
            return Err(format!(
                "request_timeout_secs must be between {} and {}",
                MIN_REQUEST_TIMEOUT_SECS, MAX_REQUEST_TIMEOUT_SECS
            ));
        }

        Ok(())
    }

    pub fn hub_config(&self, api_token: Option<SecretString>) -> HubConfig {
        HubConfig {
            hub_url: self.hub_url.trim().to_string(),
            inference_url: self.inference_url.trim().to_string(),
            api_token,
            request_timeout: Duration::from_secs(self.request_timeout_secs.into()),
        }
    }
}

// ===== Type-Safe Config Store =====

pub trait ConfigStore {
    fn get<T: DeserializeOwned>(&self, key: &ConfigKey<T>) -> Option<T>;
    fn set<T: Serialize>(&self, key: &ConfigKey<T>, value: T) -> Result<(), String>;
    fn delete<T>(&self, key: &ConfigKey<T>) -> Result<(), String>;

    /// Stored app settings. Missing or invalid settings fall back to defaults.
    fn app_config(&self) -> AppConfig {
        let Some(config) = self.get(&ConfigKey::APP) else {
            return AppConfig::default();
        };
        match config.validate() {
            Ok(()) => config,
            Err(e) => {
                warn!("Ignoring stored settings: {}", e);
                AppConfig::default()
            }
        }
    }
}

/// Settings persisted through the Tauri store plugin. Every write is flushed.
#[derive(Clone)]
pub struct Config {
    store: Arc<Store<tauri::Wry>>,
}

impl Config {
    pub fn new(store: Arc<Store<tauri::Wry>>) -> Self {
        Self { store }
    }

    fn flush(&self) -> Result<(), String> {
        self.store.save().map_err(|e| e.to_string())
    }
}

impl ConfigStore for Config {
    fn get<T: DeserializeOwned>(&self, key: &ConfigKey<T>) -> Option<T> {
        let value = self.store.get(key.key_name())?;
        serde_json::from_value(value)
            .map_err(|e| warn!("Unreadable '{}' setting: {}", key.key_name(), e))
            .ok()
    }

    fn set<T: Serialize>(&self, key: &ConfigKey<T>, value: T) -> Result<(), String> {
        let value = serde_json::to_value(value).map_err(|e| e.to_string())?;
        self.store.set(key.key_name(), value);
        self.flush()
    }

    fn delete<T>(&self, key: &ConfigKey<T>) -> Result<(), String> {
        self.store.delete(key.key_name());
        self.flush()
    }
}
