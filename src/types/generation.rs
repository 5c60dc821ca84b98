//! Generation settings.

use bon::Builder;
use serde::{Deserialize, Serialize};

/// Settings bound to every completion request issued by a service.
#[derive(Debug, Clone, Copy, Builder, Serialize, Deserialize, Default, PartialEq)]
pub struct GenerationSettings {
    pub temperature: Option<f64>,
    pub max_tokens: Option<u32>,
}
