//! Error types for decision-sim.

pub mod provider;

pub use provider::ProviderError;

use thiserror::Error;

/// Primary error type for all decision-sim operations.
#[derive(Error, Debug)]
pub enum SimError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unsupported backend: {0}")]
    UnsupportedBackend(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A completion round trip failed. The transport-level cause is kept as
    /// the source; callers are not expected to branch on it.
    #[error("Provider call failed ({provider}): {source}")]
    ProviderCall {
        provider: String,
        #[source]
        source: ProviderError,
    },

    #[error("Failed to get response from LLM for agent '{agent}': {source}")]
    Submit {
        agent: String,
        #[source]
        source: Box<SimError>,
    },

    #[error("Runtime for agent '{0}' is no longer available")]
    RuntimeUnavailable(String),

    /// The user interrupted the console (Ctrl-C) outside a chat turn.
    #[error("Interrupted by user")]
    Interrupted,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config file error: {0}")]
    ConfigFile(#[from] toml::de::Error),
}

impl SimError {
    /// Build a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Wrap a provider failure with the name of the backend that produced it.
    pub fn provider_call(provider: impl Into<String>, source: ProviderError) -> Self {
        Self::ProviderCall {
            provider: provider.into(),
            source,
        }
    }

    /// Stable machine-readable name of this error's kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::UnsupportedBackend(_) => "unsupported_backend",
            Self::Configuration(_) => "configuration",
            Self::ProviderCall { .. } => "provider_call",
            Self::Submit { .. } => "submit",
            Self::RuntimeUnavailable(_) => "runtime_unavailable",
            Self::Interrupted => "interrupted",
            Self::Io(_) => "io",
            Self::Serialization(_) => "serialization",
            Self::ConfigFile(_) => "config_file",
        }
    }

    /// The innermost `SimError` behind any number of submit wrappers.
    pub fn root(&self) -> &SimError {
        match self {
            Self::Submit { source, .. } => source.root(),
            other => other,
        }
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, SimError>;
