//! Agent runtime: turns agent-level calls into completion requests.
//!
//! - [`AgentRuntime::submit`]: one turn, history committed only on success
//! - [`AgentRuntime::run_interactive_chat`]: console-driven session yielding an [`Interaction`]
//! - [`AgentRuntime::invoke`]: one-shot call through a throwaway agent

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::config::CompletionConfig;
use crate::error::{Result, SimError};
use crate::provider::CompletionService;
use crate::types::{Message, Role};

use super::agent::Agent;
use super::console::{Console, ConsoleInput};
use super::interaction::{validate_accumulator_instruction, Interaction};

/// Interactive session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatState {
    /// Waiting for the next console line.
    AwaitingInput,
    /// A turn is in flight.
    Processing,
    /// The session is over.
    Terminated,
}

impl ChatState {
    /// Transition out of [`ChatState::AwaitingInput`] for a line of input.
    pub fn after_input(input: &str) -> ChatState {
        let input = input.trim();
        if is_exit_command(input) {
            ChatState::Terminated
        } else if input.is_empty() {
            ChatState::AwaitingInput
        } else {
            ChatState::Processing
        }
    }
}

/// `exit` or `quit`, trimmed and case-insensitive.
pub fn is_exit_command(input: &str) -> bool {
    let input = input.trim();
    input.eq_ignore_ascii_case("exit") || input.eq_ignore_ascii_case("quit")
}

pub(crate) struct RuntimeInner {
    service: CompletionService,
}

/// Central dispatcher for agents.
///
/// A cheap handle: clones share the same completion service. Agents keep only
/// a weak reference back to it.
#[derive(Clone)]
pub struct AgentRuntime {
    inner: Arc<RuntimeInner>,
}

impl std::fmt::Debug for AgentRuntime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AgentRuntime")
            .field("service", &self.inner.service)
            .finish()
    }
}

impl AgentRuntime {
    /// Wrap a completion service.
    pub fn new(service: CompletionService) -> Self {
        Self {
            inner: Arc::new(RuntimeInner { service }),
        }
    }

    /// Build a runtime from `config`, or from defaults.
    pub fn create(config: Option<CompletionConfig>) -> Result<Self> {
        let config = config.unwrap_or_default();
        let service = CompletionService::new(&config)?;
        info!(
            backend = %config.backend,
            model = %config.model,
            "agent runtime ready"
        );
        Ok(Self::new(service))
    }

    pub(crate) fn inner(&self) -> &Arc<RuntimeInner> {
        &self.inner
    }

    pub(crate) fn from_inner(inner: Arc<RuntimeInner>) -> Self {
        Self { inner }
    }

    pub fn service(&self) -> &CompletionService {
        &self.inner.service
    }

    /// Create an agent bound to this runtime. Names are not checked for
    /// uniqueness.
    pub fn create_agent(
        &self,
        name: impl Into<String>,
        instruction: impl Into<String>,
    ) -> Result<Agent> {
        let agent = Agent::create(name, instruction, self)?;
        info!(agent = agent.name(), "agent created");
        Ok(agent)
    }

    /// Run one turn for `agent`.
    ///
    /// The request is `[system: instruction] + history + [user: message]`.
    /// The user message and the reply are appended only after the backend
    /// call succeeds; on failure, history is left exactly as it was and the
    /// error is wrapped in [`SimError::Submit`].
    pub async fn submit(
        &self,
        agent: &mut Agent,
        message: &str,
        add_to_history: bool,
    ) -> Result<String> {
        let mut messages = agent.get_messages(true);
        messages.push(Message::user(message));

        debug!(
            agent = agent.name(),
            history = agent.history().len(),
            add_to_history,
            "submitting turn"
        );

        match self.inner.service.complete(messages).await {
            Ok(response) => {
                if add_to_history {
                    agent.add_message(Role::User, message);
                    agent.add_message(Role::Assistant, response.clone());
                }
                Ok(response)
            }
            Err(err) => {
                warn!(agent = agent.name(), error = %err, "turn failed; history unchanged");
                Err(SimError::Submit {
                    agent: agent.name().to_string(),
                    source: Box::new(err),
                })
            }
        }
    }

    /// One-shot call: a throwaway agent with `instruction` answers `input`
    /// without recording history.
    pub async fn invoke(
        &self,
        name: impl Into<String>,
        instruction: impl Into<String>,
        input: &str,
    ) -> Result<String> {
        let mut agent = self.create_agent(name, instruction)?;
        self.submit(&mut agent, input, false).await
    }

    /// Drive an interactive session for `agent` on `console`.
    ///
    /// A non-empty `initial_question` is written straight into history as an
    /// assistant message, without a completion call. Failed turns are reported
    /// and the session continues. `exit`/`quit`, an interrupt, or end of input
    /// ends it; completed turns are kept. The returned [`Interaction`] holds
    /// only the messages produced during this session.
    pub async fn run_interactive_chat(
        &self,
        agent: &mut Agent,
        console: &mut dyn Console,
        initial_question: Option<&str>,
        accumulator_instruction: Option<&str>,
    ) -> Result<Interaction> {
        if let Some(instruction) = accumulator_instruction {
            validate_accumulator_instruction(instruction)?;
        }

        let start_index = agent.history().len();
        info!(agent = agent.name(), start_index, "interactive session started");

        console.write_line(&format!("\n=== {} ===", agent.name()));
        console.write_line("Type 'exit' to end the conversation.\n");

        // Scripted opener: recorded directly, no completion call.
        if let Some(question) = initial_question.filter(|q| !q.is_empty()) {
            console.write_line(&format!("{}: {question}\n", agent.name()));
            agent.add_message(Role::Assistant, question);
        }

        let mut state = ChatState::AwaitingInput;
        let mut pending = String::new();
        let mut turns = 0usize;

        loop {
            match state {
                ChatState::AwaitingInput => match console.read_line("> ").await? {
                    ConsoleInput::Line(line) => {
                        state = ChatState::after_input(&line);
                        match state {
                            ChatState::Terminated => console
                                .write_line(&format!("\nEnding session with {}.", agent.name())),
                            ChatState::Processing => pending = line.trim().to_string(),
                            ChatState::AwaitingInput => {}
                        }
                    }
                    ConsoleInput::Interrupted | ConsoleInput::Closed => {
                        console.write_line("\n\nSession interrupted.");
                        state = ChatState::Terminated;
                    }
                },
                ChatState::Processing => {
                    let outcome = tokio::select! {
                        result = agent.send(&pending) => Some(result),
                        _ = console.interrupted() => None,
                    };
                    state = match outcome {
                        Some(Ok(response)) => {
                            turns += 1;
                            console.write_line(&format!("\n{}: {response}\n", agent.name()));
                            ChatState::AwaitingInput
                        }
                        Some(Err(err)) => {
                            warn!(agent = agent.name(), error = %err, "interactive turn failed");
                            console.write_line(&format!("\nError: {err}"));
                            ChatState::AwaitingInput
                        }
                        None => {
                            console.write_line("\n\nSession interrupted.");
                            ChatState::Terminated
                        }
                    };
                }
                ChatState::Terminated => break,
            }
        }

        info!(agent = agent.name(), turns, "interactive session ended");

        let interaction = Interaction::new(
            agent,
            self,
            accumulator_instruction.map(str::to_string),
        )?;
        Ok(interaction.with_conversation(agent.history()[start_index..].to_vec()))
    }
}
