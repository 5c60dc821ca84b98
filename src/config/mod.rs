//! Configuration system (layered: defaults > config file > env > CLI flags).

pub mod backend;

pub use backend::Backend;

use std::fmt;
use std::path::{Path, PathBuf};

use bon::Builder;
use serde::Deserialize;
use tracing::debug;

use crate::error::{Result, SimError};
use crate::types::GenerationSettings;

pub const DEFAULT_MODEL: &str = "gpt-4";
pub const DEFAULT_TEMPERATURE: f64 = 0.7;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;

/// Completion backend configuration.
///
/// Resolution order:
/// 1. Built-in defaults
/// 2. `config.toml` (explicit path, or the platform config directory)
/// 3. Environment variables (`DECISION_SIM_*`, then the backend's own key vars)
/// 4. Command-line overrides, applied by the caller
#[derive(Clone, Builder, PartialEq)]
pub struct CompletionConfig {
    #[builder(default = Backend::OpenAi)]
    pub backend: Backend,
    #[builder(into, default = DEFAULT_MODEL.to_string())]
    pub model: String,
    #[builder(into)]
    pub api_key: Option<String>,
    #[builder(into)]
    pub base_url: Option<String>,
    #[builder(default = DEFAULT_TEMPERATURE)]
    pub temperature: f64,
    pub max_tokens: Option<u32>,
    /// Per-call deadline in seconds. Zero disables it.
    #[builder(default = DEFAULT_REQUEST_TIMEOUT_SECS)]
    pub request_timeout_secs: u64,
}

impl fmt::Debug for CompletionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompletionConfig")
            .field("backend", &self.backend)
            .field("model", &self.model)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// On-disk shape of `config.toml`. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    backend: Option<String>,
    model: Option<String>,
    api_key: Option<String>,
    base_url: Option<String>,
    temperature: Option<f64>,
    max_tokens: Option<u32>,
    request_timeout_secs: Option<u64>,
}

/// Default location of the config file, if the platform has a config dir.
pub fn default_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "decision-sim")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

impl CompletionConfig {
    /// Load from the config file and the process environment.
    ///
    /// Loads `.env` first if present. An explicit `path` must exist; the
    /// default path is only read when it does.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let _ = dotenvy::dotenv();
        Self::load_with_env(path, |key| std::env::var(key).ok())
    }

    /// Same as [`load`](Self::load) with an injectable environment lookup.
    pub fn load_with_env(
        path: Option<&Path>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let mut config = Self::default();

        let file = match path {
            Some(p) => Some(p.to_path_buf()),
            None => default_config_path().filter(|p| p.exists()),
        };
        if let Some(file) = file {
            debug!(path = %file.display(), "loading config file");
            config.apply_file(&file)?;
        }

        config.apply_env(&env)?;
        config.validate()?;
        debug!(config = ?config, "resolved completion config");
        Ok(config)
    }

    fn apply_file(&mut self, path: &Path) -> Result<()> {
        let raw = std::fs::read_to_string(path)?;
        let file: FileConfig = toml::from_str(&raw)?;

        if let Some(backend) = file.backend {
            self.backend = Backend::parse(&backend)?;
        }
        if let Some(model) = file.model {
            self.model = model;
        }
        if file.api_key.is_some() {
            self.api_key = file.api_key;
        }
        if file.base_url.is_some() {
            self.base_url = file.base_url;
        }
        if let Some(temperature) = file.temperature {
            self.temperature = temperature;
        }
        if file.max_tokens.is_some() {
            self.max_tokens = file.max_tokens;
        }
        if let Some(secs) = file.request_timeout_secs {
            self.request_timeout_secs = secs;
        }
        Ok(())
    }

    fn apply_env(&mut self, env: &impl Fn(&str) -> Option<String>) -> Result<()> {
        let get = |key: &str| env(key).filter(|v| !v.trim().is_empty());

        if let Some(backend) = get("DECISION_SIM_BACKEND") {
            self.backend = Backend::parse(&backend)?;
        }
        if let Some(model) = get("DECISION_SIM_MODEL") {
            self.model = model;
        }
        if let Some(raw) = get("DECISION_SIM_TEMPERATURE") {
            self.temperature = parse_env("DECISION_SIM_TEMPERATURE", &raw)?;
        }
        if let Some(raw) = get("DECISION_SIM_MAX_TOKENS") {
            self.max_tokens = Some(parse_env("DECISION_SIM_MAX_TOKENS", &raw)?);
        }
        if let Some(raw) = get("DECISION_SIM_TIMEOUT_SECS") {
            self.request_timeout_secs = parse_env("DECISION_SIM_TIMEOUT_SECS", &raw)?;
        }
        if let Some(key) = get("DECISION_SIM_API_KEY") {
            self.api_key = Some(key);
        }
        if let Some(url) = get("DECISION_SIM_BASE_URL") {
            self.base_url = Some(url);
        }

        if self.api_key.is_none() {
            self.api_key = self.backend.credential_vars().iter().find_map(|var| get(*var));
        }
        if self.base_url.is_none() {
            self.base_url = self.backend.base_url_vars().iter().find_map(|var| get(*var));
        }
        Ok(())
    }

    /// Check the values that cannot be expressed by the types alone.
    pub fn validate(&self) -> Result<()> {
        if self.model.trim().is_empty() {
            return Err(SimError::Configuration("model must not be empty".into()));
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(SimError::Configuration(format!(
                "temperature must be between 0.0 and 2.0, got {}",
                self.temperature
            )));
        }
        Ok(())
    }

    /// Generation parameters bound to every request.
    pub fn settings(&self) -> GenerationSettings {
        GenerationSettings {
            temperature: Some(self.temperature),
            max_tokens: self.max_tokens,
        }
    }
}

fn parse_env<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T> {
    raw.trim()
        .parse()
        .map_err(|_| SimError::Configuration(format!("{key} has an invalid value: '{raw}'")))
}
