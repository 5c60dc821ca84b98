//! Captured conversations and their one-shot extraction step.

use tracing::debug;

use crate::error::{Result, SimError};
use crate::types::{transcript, Message};

use super::agent::Agent;
use super::runtime::AgentRuntime;

/// Prefix of the single message sent to the accumulator.
const ACCUMULATOR_PROMPT: &str = "Process this conversation:";

pub(crate) fn validate_accumulator_instruction(instruction: &str) -> Result<()> {
    if instruction.trim().is_empty() {
        return Err(SimError::validation(
            "Accumulator instruction must be a non-empty string if provided",
        ));
    }
    Ok(())
}

/// A finished conversation with one agent.
///
/// The conversation is a value copy, unaffected by anything that happens to
/// the source agent afterwards.
#[derive(Debug, Clone)]
pub struct Interaction {
    agent_name: String,
    runtime: AgentRuntime,
    accumulator_instruction: Option<String>,
    conversation_history: Vec<Message>,
}

impl Interaction {
    /// Capture `agent`'s current history.
    pub fn new(
        agent: &Agent,
        runtime: &AgentRuntime,
        accumulator_instruction: Option<String>,
    ) -> Result<Self> {
        if let Some(ref instruction) = accumulator_instruction {
            validate_accumulator_instruction(instruction)?;
        }
        Ok(Self {
            agent_name: agent.name().to_string(),
            runtime: runtime.clone(),
            accumulator_instruction,
            conversation_history: agent.history().to_vec(),
        })
    }

    /// Replace the captured conversation with a session slice.
    pub(crate) fn with_conversation(mut self, conversation: Vec<Message>) -> Self {
        self.conversation_history = conversation;
        self
    }

    pub fn agent_name(&self) -> &str {
        &self.agent_name
    }

    pub fn accumulator_instruction(&self) -> Option<&str> {
        self.accumulator_instruction.as_deref()
    }

    /// Reduce the conversation with a throwaway accumulator agent.
    ///
    /// Returns `Ok(None)` without touching the backend when no accumulator
    /// instruction was given. Otherwise exactly one completion is requested,
    /// nothing is recorded, and the reply is returned verbatim.
    pub async fn finalize(&self) -> Result<Option<String>> {
        let Some(ref instruction) = self.accumulator_instruction else {
            return Ok(None);
        };

        let mut accumulator = self
            .runtime
            .create_agent(format!("{} - Accumulator", self.agent_name), instruction.clone())?;

        debug!(
            agent = self.agent_name.as_str(),
            messages = self.conversation_history.len(),
            "finalizing interaction"
        );

        let message = format!("{ACCUMULATOR_PROMPT}\n\n{}", self.get_transcript());
        let result = accumulator.send_with(&message, false).await?;
        Ok(Some(result))
    }

    /// The captured messages, oldest first.
    pub fn get_conversation(&self) -> &[Message] {
        &self.conversation_history
    }

    /// One `"role: content"` line per captured message.
    pub fn get_transcript(&self) -> String {
        transcript(&self.conversation_history)
    }
}
