//! Supported completion backends.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::{Result, SimError};

/// Closed set of completion backends.
///
/// Parsing is the only way a backend identifier enters the system, so an
/// unknown identifier is rejected while configuration is being read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum Backend {
    #[serde(rename = "openai")]
    #[strum(serialize = "openai")]
    OpenAi,
    #[serde(rename = "anthropic")]
    #[strum(serialize = "anthropic")]
    Anthropic,
    #[serde(rename = "openai-compatible")]
    #[strum(serialize = "openai-compatible")]
    OpenAiCompatible,
}

impl Backend {
    /// Parse a backend identifier, rejecting unknown or compiled-out backends.
    pub fn parse(id: &str) -> Result<Self> {
        let backend: Backend = id
            .trim()
            .parse()
            .map_err(|_| SimError::UnsupportedBackend(id.trim().to_string()))?;
        if !backend.is_enabled() {
            return Err(SimError::UnsupportedBackend(format!(
                "{backend} (not enabled in this build)"
            )));
        }
        Ok(backend)
    }

    /// Whether the cargo feature for this backend was compiled in.
    pub fn is_enabled(self) -> bool {
        match self {
            Self::OpenAi => cfg!(feature = "openai"),
            Self::Anthropic => cfg!(feature = "anthropic"),
            Self::OpenAiCompatible => cfg!(feature = "openai-compatible"),
        }
    }

    /// Environment variables consulted for a credential, in order.
    pub fn credential_vars(self) -> &'static [&'static str] {
        match self {
            Self::OpenAi => &["OPENAI_API_KEY"],
            Self::Anthropic => &["ANTHROPIC_API_KEY"],
            Self::OpenAiCompatible => &["OPENAI_COMPAT_API_KEY", "OPENAI_API_KEY"],
        }
    }

    /// Environment variables consulted for a base URL override, in order.
    pub fn base_url_vars(self) -> &'static [&'static str] {
        match self {
            Self::OpenAi => &["OPENAI_BASE_URL"],
            Self::Anthropic => &["ANTHROPIC_BASE_URL"],
            Self::OpenAiCompatible => &["OPENAI_COMPAT_BASE_URL"],
        }
    }
}
