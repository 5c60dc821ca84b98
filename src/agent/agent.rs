//! Named, stateful conversation participant.

use std::sync::{Arc, Weak};

use crate::error::{Result, SimError};
use crate::types::{Message, Role};

use super::console::Console;
use super::interaction::Interaction;
use super::runtime::{AgentRuntime, RuntimeInner};

/// An agent bound to a system instruction and a runtime.
///
/// History only changes through a successful [`send`](Self::send), the
/// scripted opener of an interactive session, or [`clear_history`](Self::clear_history).
/// Every method that can touch history takes `&mut self`, so turns against one
/// agent are always serialized.
#[derive(Debug)]
pub struct Agent {
    name: String,
    instruction: String,
    history: Vec<Message>,
    runtime: Weak<RuntimeInner>,
}

impl Agent {
    /// Create an agent bound to `runtime`.
    ///
    /// Fails if `name` or `instruction` is empty after trimming.
    pub fn create(
        name: impl Into<String>,
        instruction: impl Into<String>,
        runtime: &AgentRuntime,
    ) -> Result<Self> {
        let name = name.into();
        let instruction = instruction.into();
        if name.trim().is_empty() {
            return Err(SimError::validation("Agent name must be a non-empty string"));
        }
        if instruction.trim().is_empty() {
            return Err(SimError::validation(
                "Agent instruction must be a non-empty string",
            ));
        }
        Ok(Self {
            name,
            instruction,
            history: Vec::new(),
            runtime: Arc::downgrade(runtime.inner()),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn instruction(&self) -> &str {
        &self.instruction
    }

    /// Messages recorded so far, oldest first.
    pub fn history(&self) -> &[Message] {
        &self.history
    }

    /// The runtime this agent was created by, if it is still alive.
    pub fn runtime(&self) -> Result<AgentRuntime> {
        self.runtime
            .upgrade()
            .map(AgentRuntime::from_inner)
            .ok_or_else(|| SimError::RuntimeUnavailable(self.name.clone()))
    }

    /// Send a message and record the exchange in history.
    pub async fn send(&mut self, message: &str) -> Result<String> {
        self.send_with(message, true).await
    }

    /// Send a message; record the exchange only if `add_to_history`.
    pub async fn send_with(&mut self, message: &str, add_to_history: bool) -> Result<String> {
        let runtime = self.runtime()?;
        runtime.submit(self, message, add_to_history).await
    }

    /// Run an interactive session on `console`.
    pub async fn interact(
        &mut self,
        console: &mut dyn Console,
        initial_question: Option<&str>,
        accumulator_instruction: Option<&str>,
    ) -> Result<Interaction> {
        let runtime = self.runtime()?;
        runtime
            .run_interactive_chat(self, console, initial_question, accumulator_instruction)
            .await
    }

    /// Full message list: the instruction as a system message (if requested)
    /// followed by history.
    pub fn get_messages(&self, include_system: bool) -> Vec<Message> {
        let mut messages = Vec::with_capacity(self.history.len() + 1);
        if include_system {
            messages.push(Message::system(self.instruction.clone()));
        }
        messages.extend(self.history.iter().cloned());
        messages
    }

    /// Drop all history.
    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Replace the instruction used by later calls.
    ///
    /// Unlike [`create`](Self::create), this does not validate.
    pub fn set_instruction(&mut self, instruction: impl Into<String>) {
        self.instruction = instruction.into();
    }

    pub(crate) fn add_message(&mut self, role: Role, content: impl Into<String>) {
        self.history.push(Message::new(role, content));
    }
}
