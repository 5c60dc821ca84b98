//! Persona record.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Pure data description of a simulated person.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Persona {
    pub name: String,
    pub background: String,
    #[serde(default)]
    pub personality_traits: Vec<String>,
    #[serde(default)]
    pub goals: Vec<String>,
    #[serde(default)]
    pub communication_style: Option<String>,
    #[serde(default)]
    pub expertise: Option<String>,
    #[serde(default)]
    pub values: Option<BTreeMap<String, serde_json::Value>>,
    #[serde(default)]
    pub quirks: Option<String>,
}

impl Persona {
    pub fn new(name: impl Into<String>, background: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            background: background.into(),
            personality_traits: Vec::new(),
            goals: Vec::new(),
            communication_style: None,
            expertise: None,
            values: None,
            quirks: None,
        }
    }

    pub fn to_json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }

    pub fn from_json(value: serde_json::Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// Parse a persona from model output: a JSON object, optionally inside a
    /// Markdown code fence.
    pub fn from_model_output(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(strip_code_fence(text))?)
    }

    /// One-line summary: `"name: background | Traits: a, b"`.
    pub fn summary(&self) -> String {
        let mut parts = vec![format!("{}: {}", self.name, self.background)];
        if !self.personality_traits.is_empty() {
            parts.push(format!("Traits: {}", self.personality_traits.join(", ")));
        }
        parts.join(" | ")
    }
}

fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the info string ("json") on the opening fence line.
    let body = rest.split_once('\n').map_or("", |(_, body)| body);
    body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}
